//! Hand-off of built control loops to a runtime that owns their execution.
//!
//! [`SupervisorLauncher`] submits each loop to a taskvisor [`Supervisor`] as its own slot;
//! the sequencer only needs the [`LoopLauncher`] seam.
use std::sync::Arc;

use async_trait::async_trait;
use taskvisor::{ControllerConfig, Subscribe, Supervisor, SupervisorConfig};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

use crate::{
    controller::LoopRef,
    error::CoreError,
    map::{to_controller_spec, to_task_ref},
    metrics::MetricsHandle,
};

/// Starts a built control loop in the background.
///
/// `launch` returns once the loop has been accepted; it never waits for the loop to finish.
#[async_trait]
pub trait LoopLauncher: Send + Sync {
    async fn launch(&self, control: LoopRef) -> Result<(), CoreError>;
}

/// Launcher backed by a taskvisor supervisor.
///
/// Each loop runs in a slot named after its kind, is never restarted, and is stopped
/// through the cancellation token the supervisor hands to it.
pub struct SupervisorLauncher {
    sup: Arc<Supervisor>,
    metrics: MetricsHandle,
    stopped: CancellationToken,
}

impl SupervisorLauncher {
    /// Create a supervisor and start its run loop in background.
    pub async fn new(
        sup_cfg: SupervisorConfig,
        ctrl_cfg: ControllerConfig,
        subscribers: Vec<Arc<dyn Subscribe>>,
        metrics: MetricsHandle,
    ) -> Result<Self, CoreError> {
        let sup = Supervisor::builder(sup_cfg)
            .with_subscribers(subscribers)
            .with_controller(ctrl_cfg)
            .build();
        let stopped = CancellationToken::new();

        let runner = Arc::clone(&sup);
        let guard = stopped.clone();
        tokio::spawn(async move {
            match runner.run(Vec::new()).await {
                Ok(()) => debug!("supervisor run loop finished"),
                Err(e) => error!(error = %e, "supervisor run loop exited with error"),
            }
            guard.cancel();
        });
        sup.wait_ready().await;
        info!("supervisor is ready to accept control loops");

        Ok(Self {
            sup,
            metrics,
            stopped,
        })
    }

    /// Get a clone of the underlying supervisor handle.
    pub fn supervisor(&self) -> Arc<Supervisor> {
        Arc::clone(&self.sup)
    }

    /// Resolves once the supervisor run loop has exited.
    pub async fn stopped(&self) {
        self.stopped.cancelled().await
    }
}

#[async_trait]
impl LoopLauncher for SupervisorLauncher {
    #[instrument(level = "debug", skip(self, control), fields(controller = %control.kind()))]
    async fn launch(&self, control: LoopRef) -> Result<(), CoreError> {
        if self.stopped.is_cancelled() {
            return Err(CoreError::ShutDown);
        }
        let task = to_task_ref(control, Arc::clone(&self.metrics));

        debug!("submitting via controller");
        self.sup
            .submit(to_controller_spec(task))
            .await
            .map_err(|e| CoreError::Supervisor(e.to_string()))
    }
}
