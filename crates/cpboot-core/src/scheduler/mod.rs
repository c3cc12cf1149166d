//! Scheduler configuration resolution.
//!
//! Decides once per process whether the scheduler runs from an operator-supplied policy
//! document or from the built-in default provider, and materializes the choice through a
//! [`ConfigFactory`].
mod config;
pub use config::{EventSource, PolicySource, SchedulerConfig, WeightedPriority};

mod error;
pub use error::{FactoryError, ResolveError, ResolveStage};

mod factory;
pub use factory::{ConfigFactory, RegistryConfigFactory};

mod registry;
pub use registry::{AlgorithmProvider, AlgorithmRegistry, DEFAULT_PROVIDER};

mod resolver;
pub use resolver::SchedulerConfigResolver;

/// Event source component attached to the scheduler's configuration.
pub const SCHEDULER_COMPONENT: &str = "scheduler";
