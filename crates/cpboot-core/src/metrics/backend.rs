use std::sync::Arc;

/// How a running control loop terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopOutcome {
    /// Returned cleanly.
    Stopped,
    /// Returned an error.
    Failed,
    /// Stopped by cancellation.
    Canceled,
}

impl LoopOutcome {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            LoopOutcome::Stopped => "stopped",
            LoopOutcome::Failed => "failed",
            LoopOutcome::Canceled => "canceled",
        }
    }
}

/// Backend metrics collection interface.
///
/// `controller` is always a [`cpboot_model::ControllerKind`] label.
pub trait MetricsBackend: Send + Sync + 'static {
    /// Record a control loop handed to the launcher.
    fn record_loop_started(&self, controller: &str);
    /// Record a control loop exit.
    fn record_loop_exited(&self, controller: &str, outcome: LoopOutcome);
    /// Record a failure to bring a control loop up.
    ///
    /// `stage` names the failing step ("probe", "decode", "build", ...).
    fn record_startup_failure(&self, controller: &str, stage: &str);
}

/// Shared handle to metrics backend.
pub type MetricsHandle = Arc<dyn MetricsBackend>;
