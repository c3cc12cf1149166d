pub mod api;
pub mod client;
pub mod controller;
pub mod error;
pub mod launcher;
pub mod map;
pub mod scheduler;
pub mod sequencer;
pub mod volume;

mod metrics;
pub use metrics::{LoopOutcome, MetricsBackend, MetricsHandle, NoOpMetrics, noop_metrics};

pub use api::{API_PREFIX, LEGACY_API_PREFIX, StartupMessage, startup_messages};
pub use client::{ClientHandle, CloudHandle, CloudProvider, ControlPlaneClient};
pub use controller::{
    BuildError, ControlLoop, ControllerFactory, EvictionRateLimit, LoopError, LoopRef,
    NodeControllerParams, ReplicationParams,
};
pub use error::{CoreError, SchedulerStartError, StartupError};
pub use launcher::{LoopLauncher, SupervisorLauncher};
pub use scheduler::{
    AlgorithmProvider, AlgorithmRegistry, ConfigFactory, DEFAULT_PROVIDER, FactoryError,
    PolicySource, RegistryConfigFactory, ResolveError, ResolveStage, SCHEDULER_COMPONENT,
    SchedulerConfig, SchedulerConfigResolver,
};
pub use sequencer::{Sequencer, StartupParams};
pub use volume::{
    RecyclerError, VolumePlugin, VolumePluginFamilies, VolumePluginProber, VolumePluginRef,
    probe_recyclable_plugins,
};

pub mod prelude {
    pub use crate::controller::{ControlLoop, ControllerFactory, LoopError, LoopRef};
    pub use crate::error::StartupError;
    pub use crate::launcher::{LoopLauncher, SupervisorLauncher};
    pub use crate::scheduler::{ConfigFactory, RegistryConfigFactory, SchedulerConfig};
    pub use crate::sequencer::{Sequencer, StartupParams};
}
