use crate::metrics::backend::{LoopOutcome, MetricsBackend};

/// Metrics backend that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl MetricsBackend for NoOpMetrics {
    #[inline(always)]
    fn record_loop_started(&self, _: &str) {}

    #[inline(always)]
    fn record_loop_exited(&self, _: &str, _: LoopOutcome) {}

    #[inline(always)]
    fn record_startup_failure(&self, _: &str, _: &str) {}
}
