mod config;
mod loops;

use std::{sync::Arc, time::Duration};

use tracing::{error, info, warn};

use cpboot_core::{
    AlgorithmRegistry, ClientHandle, RegistryConfigFactory, Sequencer, StartupParams,
    SupervisorLauncher, VolumePluginFamilies, startup_messages,
};
use cpboot_model::VolumeKind;
use cpboot_observe::{Subscriber, init_logger};
use cpboot_prometheus::PrometheusMetrics;
use taskvisor::{ControllerConfig, Subscribe, SupervisorConfig};

use config::{CONFIG_ENV, MasterConfig, config_path};
use loops::{BuiltinProber, LocalClient, LocalControllerFactory};

/// How long control loops get to stop after an interrupt.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // 1) config + logger
    let path = config_path(std::env::args_os().nth(1), std::env::var_os(CONFIG_ENV));
    let cfg = MasterConfig::load(path.as_deref())?;
    init_logger(&cfg.logger)?;
    info!(config = ?path, "logger initialized");

    // 2) metrics + supervisor
    let metrics = Arc::new(PrometheusMetrics::new()?);
    let subscribers: Vec<Arc<dyn Subscribe>> = vec![Arc::new(Subscriber)];
    let launcher = Arc::new(
        SupervisorLauncher::new(
            SupervisorConfig::default(),
            ControllerConfig::default(),
            subscribers,
            metrics.clone(),
        )
        .await?,
    );

    // 3) collaborators
    let client: ClientHandle = Arc::new(LocalClient::new(cfg.api_address.as_str()));
    let families = VolumePluginFamilies::new(
        Arc::new(BuiltinProber::new(VolumeKind::HostPath)),
        Arc::new(BuiltinProber::new(VolumeKind::Nfs)),
    );
    let scheduler_factory = Arc::new(RegistryConfigFactory::new(
        Arc::clone(&client),
        AlgorithmRegistry::with_defaults(),
    ));
    let params = StartupParams::new(
        client,
        families,
        Arc::new(LocalControllerFactory),
        scheduler_factory,
    )
    .with_master(cfg.master.clone())
    .with_controllers(cfg.controllers.clone());

    for msg in startup_messages(&cfg.master.api) {
        info!("{}", msg.render(&cfg.api_address));
    }

    // 4) control loops
    let started = Sequencer::new(&params, launcher.clone())
        .with_metrics(metrics.clone())
        .start_all()
        .await
        .inspect_err(|e| {
            if e.is_fatal() {
                let subsystem = e.controller().map_or("required loops", |k| k.description());
                error!(stage = e.stage(), "control plane cannot run without the {subsystem}");
            }
        })?;
    info!(controllers = started.len(), "control plane bootstrap complete");

    // 5) wait
    tokio::select! {
        _ = launcher.stopped() => warn!("supervisor stopped"),
        res = tokio::signal::ctrl_c() => {
            res?;
            info!("interrupt received; waiting for control loops to stop");
            if tokio::time::timeout(SHUTDOWN_GRACE, launcher.stopped()).await.is_err() {
                warn!(grace_secs = SHUTDOWN_GRACE.as_secs(), "control loops did not stop in time");
            }
        }
    }
    report_metrics(&metrics);
    Ok(())
}

/// Log the final counter values in the text exposition format.
fn report_metrics(metrics: &PrometheusMetrics) -> Option<String> {
    match metrics.encode_text() {
        Ok(text) => {
            info!(metrics = %text, "bootstrap metrics at shutdown");
            Some(text)
        }
        Err(e) => {
            warn!(error = %e, "failed to encode metrics");
            None
        }
    }
}
