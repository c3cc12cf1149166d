//! Control loop abstraction and the constructors the bootstrap sequence builds loops with.
//!
//! The reconciliation logic of each loop lives behind [`ControllerFactory`]; the sequencer
//! only builds a loop and hands it to a launcher.
mod error;
pub use error::{BuildError, LoopError};

mod params;
pub use params::{EvictionRateLimit, NodeControllerParams, ReplicationParams};

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use cpboot_model::ControllerKind;
use tokio_util::sync::CancellationToken;

use crate::{
    client::{ClientHandle, CloudHandle},
    scheduler::SchedulerConfig,
    volume::VolumePluginRef,
};

/// A long-running subsystem that reconciles one aspect of cluster state.
///
/// `run` is expected to loop until `cancel` fires; returning `Ok(())` means a clean stop.
#[async_trait]
pub trait ControlLoop: Send + Sync {
    /// Which subsystem this loop implements.
    fn kind(&self) -> ControllerKind;

    /// Run the loop until cancellation or an unrecoverable error.
    async fn run(&self, cancel: CancellationToken) -> Result<(), LoopError>;
}

/// Shared, type-erased control loop.
pub type LoopRef = Arc<dyn ControlLoop>;

/// Constructors for every control loop started at bootstrap.
///
/// Construction may perform one-time setup and fail; such failures are reported as
/// [`BuildError`] and never reach the launcher.
pub trait ControllerFactory: Send + Sync {
    fn namespace_manager(
        &self,
        client: ClientHandle,
        sync_period: Duration,
    ) -> Result<LoopRef, BuildError>;

    fn claim_binder(&self, client: ClientHandle, sync_period: Duration)
    -> Result<LoopRef, BuildError>;

    fn volume_recycler(
        &self,
        client: ClientHandle,
        sync_period: Duration,
        plugins: Vec<VolumePluginRef>,
    ) -> Result<LoopRef, BuildError>;

    fn replication_manager(
        &self,
        client: ClientHandle,
        params: ReplicationParams,
    ) -> Result<LoopRef, BuildError>;

    fn endpoint_controller(
        &self,
        client: ClientHandle,
        concurrent_syncs: usize,
    ) -> Result<LoopRef, BuildError>;

    /// Build the scheduler from an already resolved configuration.
    fn scheduler(&self, config: SchedulerConfig) -> Result<LoopRef, BuildError>;

    fn resource_quota_manager(
        &self,
        client: ClientHandle,
        sync_period: Duration,
    ) -> Result<LoopRef, BuildError>;

    fn node_controller(
        &self,
        cloud: Option<CloudHandle>,
        client: ClientHandle,
        params: NodeControllerParams,
    ) -> Result<LoopRef, BuildError>;
}
