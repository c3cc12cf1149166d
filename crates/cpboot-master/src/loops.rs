//! In-process collaborators wired into the bootstrap sequence.
//!
//! Reconciliation itself lives outside this process; each loop here keeps its slot alive,
//! ticking at its sync period until the supervisor cancels it.
use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use cpboot_core::{
    BuildError, ClientHandle, CloudHandle, ControlLoop, ControlPlaneClient, ControllerFactory,
    LoopError, LoopRef, NodeControllerParams, ReplicationParams, SchedulerConfig, VolumePlugin,
    VolumePluginProber, VolumePluginRef,
};
use cpboot_model::{ControllerKind, RecyclableVolumeConfig, VolumeKind};
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// Resync period of loops driven by watch events rather than a configured period.
const RESYNC_PERIOD: Duration = Duration::from_secs(30);

/// Client handle bound to the local API address.
pub struct LocalClient {
    endpoint: String,
}

impl LocalClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl ControlPlaneClient for LocalClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Control loop that ticks at a fixed period until cancelled.
pub struct PeriodicLoop {
    kind: ControllerKind,
    period: Duration,
    client: ClientHandle,
    detail: String,
}

impl PeriodicLoop {
    pub fn new(kind: ControllerKind, period: Duration, client: ClientHandle) -> Self {
        Self {
            kind,
            period,
            client,
            detail: String::new(),
        }
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    fn into_ref(self) -> LoopRef {
        Arc::new(self)
    }
}

#[async_trait]
impl ControlLoop for PeriodicLoop {
    fn kind(&self) -> ControllerKind {
        self.kind
    }

    async fn run(&self, cancel: CancellationToken) -> Result<(), LoopError> {
        debug!(
            controller = %self.kind,
            period = ?self.period,
            endpoint = self.client.endpoint(),
            detail = %self.detail,
            "control loop running"
        );
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => return Err(LoopError::Canceled),
                _ = ticker.tick() => trace!(controller = %self.kind, "sync"),
            }
        }
    }
}

/// Builds a [`PeriodicLoop`] for every controller kind.
#[derive(Debug, Default)]
pub struct LocalControllerFactory;

impl ControllerFactory for LocalControllerFactory {
    fn namespace_manager(
        &self,
        client: ClientHandle,
        sync_period: Duration,
    ) -> Result<LoopRef, BuildError> {
        Ok(PeriodicLoop::new(ControllerKind::Namespace, sync_period, client).into_ref())
    }

    fn claim_binder(&self, client: ClientHandle, sync_period: Duration) -> Result<LoopRef, BuildError> {
        Ok(PeriodicLoop::new(ControllerKind::ClaimBinder, sync_period, client).into_ref())
    }

    fn volume_recycler(
        &self,
        client: ClientHandle,
        sync_period: Duration,
        plugins: Vec<VolumePluginRef>,
    ) -> Result<LoopRef, BuildError> {
        let names: Vec<&str> = plugins.iter().map(|p| p.name()).collect();
        Ok(PeriodicLoop::new(ControllerKind::VolumeRecycler, sync_period, client)
            .with_detail(format!("plugins={}", names.join(",")))
            .into_ref())
    }

    fn replication_manager(
        &self,
        client: ClientHandle,
        params: ReplicationParams,
    ) -> Result<LoopRef, BuildError> {
        Ok(PeriodicLoop::new(ControllerKind::Replication, RESYNC_PERIOD, client)
            .with_detail(format!(
                "workers={} burst={}",
                params.concurrent_syncs, params.burst_replicas
            ))
            .into_ref())
    }

    fn endpoint_controller(
        &self,
        client: ClientHandle,
        concurrent_syncs: usize,
    ) -> Result<LoopRef, BuildError> {
        Ok(PeriodicLoop::new(ControllerKind::Endpoint, RESYNC_PERIOD, client)
            .with_detail(format!("workers={concurrent_syncs}"))
            .into_ref())
    }

    fn scheduler(&self, config: SchedulerConfig) -> Result<LoopRef, BuildError> {
        if config.event_source().is_none() {
            return Err(BuildError::MissingCollaborator("scheduler event source"));
        }
        let client = Arc::clone(config.client());
        Ok(PeriodicLoop::new(ControllerKind::Scheduler, RESYNC_PERIOD, client)
            .with_detail(config.to_string())
            .into_ref())
    }

    fn resource_quota_manager(
        &self,
        client: ClientHandle,
        sync_period: Duration,
    ) -> Result<LoopRef, BuildError> {
        Ok(PeriodicLoop::new(ControllerKind::ResourceQuota, sync_period, client).into_ref())
    }

    fn node_controller(
        &self,
        cloud: Option<CloudHandle>,
        client: ClientHandle,
        params: NodeControllerParams,
    ) -> Result<LoopRef, BuildError> {
        let cloud = cloud.as_ref().map(|c| c.name().to_string());
        let cidr = params.cluster_cidr.map(|c| c.to_string());
        Ok(PeriodicLoop::new(ControllerKind::Node, params.node_monitor_period, client)
            .with_detail(format!(
                "cloud={} cidr={} allocate={}",
                cloud.as_deref().unwrap_or("none"),
                cidr.as_deref().unwrap_or("none"),
                params.allocate_node_cidrs
            ))
            .into_ref())
    }
}

/// Built-in recycler plugin of one volume family.
#[derive(Debug)]
pub struct RecyclerPlugin {
    name: String,
}

impl VolumePlugin for RecyclerPlugin {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Prober for the built-in plugin of one volume family.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinProber {
    family: VolumeKind,
}

impl BuiltinProber {
    pub fn new(family: VolumeKind) -> Self {
        Self { family }
    }
}

impl VolumePluginProber for BuiltinProber {
    fn probe(&self, config: &RecyclableVolumeConfig) -> Result<Vec<VolumePluginRef>, BuildError> {
        config
            .validate(self.family)
            .map_err(|e| BuildError::InvalidConfig(e.to_string()))?;
        debug!(family = %self.family, recipe = %config, "probed built-in recycler plugin");
        Ok(vec![Arc::new(RecyclerPlugin {
            name: format!("cpboot.io/{}", self.family),
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpboot_model::ControllerManagerOptions;
    use tracing_subscriber::util::SubscriberInitExt;

    fn client() -> ClientHandle {
        Arc::new(LocalClient::new("https://127.0.0.1:8443"))
    }

    #[tokio::test(start_paused = true)]
    async fn periodic_loop_stops_on_cancel() {
        let control = PeriodicLoop::new(ControllerKind::Namespace, Duration::from_secs(5), client());
        let cancel = CancellationToken::new();

        let stopper = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(12)).await;
            stopper.cancel();
        });

        let res = control.run(cancel).await;
        assert!(matches!(res, Err(LoopError::Canceled)));
    }

    #[tokio::test(start_paused = true)]
    async fn unbounded_period_is_logged_and_cancellable() {
        let _guard = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .set_default();

        let control = PeriodicLoop::new(ControllerKind::Namespace, Duration::MAX, client());
        let cancel = CancellationToken::new();

        let stopper = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            stopper.cancel();
        });

        let res = control.run(cancel).await;
        assert!(matches!(res, Err(LoopError::Canceled)));
    }

    #[test]
    fn node_loop_builds_without_cloud() {
        let params = NodeControllerParams::from_options(&ControllerManagerOptions::default()).unwrap();
        let control = LocalControllerFactory
            .node_controller(None, client(), params)
            .unwrap();
        assert_eq!(control.kind(), ControllerKind::Node);
    }

    #[test]
    fn builtin_prober_names_plugin_after_family() {
        let recipe = RecyclableVolumeConfig::nfs("cpboot/volume-recycler:latest");
        let plugins = BuiltinProber::new(VolumeKind::Nfs).probe(&recipe).unwrap();

        assert_eq!(plugins.len(), 1);
        assert_eq!(plugins[0].name(), "cpboot.io/nfs");
    }

    #[test]
    fn builtin_prober_rejects_blank_image() {
        let recipe = RecyclableVolumeConfig::host_path(" ");
        assert!(matches!(
            BuiltinProber::new(VolumeKind::HostPath).probe(&recipe),
            Err(BuildError::InvalidConfig(_))
        ));
    }
}
