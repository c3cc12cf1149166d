//! Bootstrap sequence of the control plane.
//!
//! Starts every control loop exactly once, in a fixed order. Failure handling differs per
//! loop: the volume recycler and the scheduler are required and their failures are fatal,
//! all other loops report build/launch failures to the caller.
mod params;
pub use params::StartupParams;

use std::sync::Arc;

use cpboot_model::ControllerKind;
use tracing::{error, info, warn};

use crate::{
    client::ClientHandle,
    controller::{BuildError, LoopRef, NodeControllerParams, ReplicationParams},
    error::{SchedulerStartError, StartupError},
    launcher::LoopLauncher,
    metrics::{MetricsHandle, noop_metrics},
    scheduler::{SCHEDULER_COMPONENT, SchedulerConfigResolver},
    volume::{RecyclerError, probe_recyclable_plugins},
};

/// Drives the startup of all control loops against one set of [`StartupParams`].
pub struct Sequencer<'a> {
    params: &'a StartupParams,
    launcher: Arc<dyn LoopLauncher>,
    metrics: MetricsHandle,
}

impl<'a> Sequencer<'a> {
    pub fn new(params: &'a StartupParams, launcher: Arc<dyn LoopLauncher>) -> Self {
        Self {
            params,
            launcher,
            metrics: noop_metrics(),
        }
    }

    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }

    /// Start every control loop in order and return the started kinds.
    ///
    /// Order: namespace, claim binder, volume recycler, replication, endpoint, scheduler,
    /// resource quota, node. The first failure stops the sequence; loops started before it
    /// keep running.
    pub async fn start_all(&self) -> Result<Vec<ControllerKind>, StartupError> {
        self.params
            .controllers()
            .validate()
            .map_err(|e| self.failed(StartupError::Options(e)))?;

        self.run_namespace_controller().await?;
        self.run_claim_binder().await?;
        self.run_volume_recycler().await?;
        self.run_replication_controller(Arc::clone(self.params.client()))
            .await?;
        self.run_endpoint_controller().await?;
        self.run_scheduler().await?;
        self.run_resource_quota_manager().await?;
        self.run_node_controller().await?;

        Ok(ControllerKind::ALL.to_vec())
    }

    pub async fn run_namespace_controller(&self) -> Result<(), StartupError> {
        let p = self.params;
        let built = p
            .controller_factory()
            .namespace_manager(Arc::clone(p.client()), p.controllers().namespace_sync_period());
        self.activate(ControllerKind::Namespace, built).await
    }

    pub async fn run_claim_binder(&self) -> Result<(), StartupError> {
        let p = self.params;
        let built = p.controller_factory().claim_binder(
            Arc::clone(p.client()),
            p.controllers().pv_claim_binder_sync_period(),
        );
        self.activate(ControllerKind::ClaimBinder, built).await
    }

    /// Probe recyclable volume plugins and start the recycler. Any failure is fatal.
    pub async fn run_volume_recycler(&self) -> Result<(), StartupError> {
        self.start_recycler()
            .await
            .map_err(|e| self.failed(StartupError::Recycler(e)))?;
        self.started(ControllerKind::VolumeRecycler);
        Ok(())
    }

    async fn start_recycler(&self) -> Result<(), RecyclerError> {
        let p = self.params;
        let plugins = probe_recyclable_plugins(&p.master().recycler_image, p.volume_plugins())?;

        let control = p
            .controller_factory()
            .volume_recycler(
                Arc::clone(p.client()),
                p.controllers().pv_claim_binder_sync_period(),
                plugins,
            )
            .map_err(RecyclerError::Build)?;
        self.launcher
            .launch(control)
            .await
            .map_err(RecyclerError::Launch)
    }

    /// Start the replication manager with its own client handle.
    pub async fn run_replication_controller(
        &self,
        client: ClientHandle,
    ) -> Result<(), StartupError> {
        let p = self.params;
        let built = p
            .controller_factory()
            .replication_manager(client, ReplicationParams::from_options(p.controllers()));
        self.activate(ControllerKind::Replication, built).await
    }

    pub async fn run_endpoint_controller(&self) -> Result<(), StartupError> {
        let p = self.params;
        let built = p.controller_factory().endpoint_controller(
            Arc::clone(p.client()),
            p.controllers().concurrent_endpoint_syncs,
        );
        self.activate(ControllerKind::Endpoint, built).await
    }

    /// Resolve the scheduler configuration, then build and start the scheduler.
    ///
    /// Any failure is fatal; the scheduler is never launched after a failed resolution.
    pub async fn run_scheduler(&self) -> Result<(), StartupError> {
        self.start_scheduler()
            .await
            .map_err(|e| self.failed(StartupError::Scheduler(e)))?;
        self.started(ControllerKind::Scheduler);
        Ok(())
    }

    async fn start_scheduler(&self) -> Result<(), SchedulerStartError> {
        let p = self.params;
        let config = SchedulerConfigResolver::from_options(p.master())
            .resolve(p.scheduler_factory())?
            .with_event_source(SCHEDULER_COMPONENT);
        info!(%config, "resolved scheduler configuration");

        let control = p
            .controller_factory()
            .scheduler(config)
            .map_err(SchedulerStartError::Build)?;
        self.launcher
            .launch(control)
            .await
            .map_err(SchedulerStartError::Launch)
    }

    pub async fn run_resource_quota_manager(&self) -> Result<(), StartupError> {
        let p = self.params;
        let built = p.controller_factory().resource_quota_manager(
            Arc::clone(p.client()),
            p.controllers().resource_quota_sync_period(),
        );
        self.activate(ControllerKind::ResourceQuota, built).await
    }

    pub async fn run_node_controller(&self) -> Result<(), StartupError> {
        let p = self.params;
        let built = NodeControllerParams::from_options(p.controllers()).and_then(|params| {
            p.controller_factory()
                .node_controller(p.cloud().cloned(), Arc::clone(p.client()), params)
        });
        self.activate(ControllerKind::Node, built).await
    }

    /// Launch a built loop whose failures are reported to the caller.
    async fn activate(
        &self,
        kind: ControllerKind,
        built: Result<LoopRef, BuildError>,
    ) -> Result<(), StartupError> {
        let control = built.map_err(|source| {
            self.failed(StartupError::Build {
                controller: kind,
                source,
            })
        })?;
        self.launcher.launch(control).await.map_err(|source| {
            self.failed(StartupError::Launch {
                controller: kind,
                source,
            })
        })?;
        self.started(kind);
        Ok(())
    }

    fn started(&self, kind: ControllerKind) {
        info!(controller = %kind, "started {}", kind.description());
        self.metrics.record_loop_started(kind.as_str());
    }

    fn failed(&self, err: StartupError) -> StartupError {
        let stage = err.stage();
        match err.controller() {
            Some(kind) => {
                self.metrics.record_startup_failure(kind.as_str(), stage);
                if err.is_fatal() {
                    error!(controller = %kind, stage, error = %err, "fatal startup failure");
                } else {
                    warn!(controller = %kind, stage, error = %err, "control loop did not start");
                }
            }
            None => warn!(stage, error = %err, "startup aborted"),
        }
        err
    }
}
