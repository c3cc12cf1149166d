//! Metrics collection abstraction for the bootstrap sequence.
//!
//! Backends (prometheus, etc) implement [`MetricsBackend`] and are handed to the
//! [`crate::Sequencer`] and the launcher.
mod backend;
pub use backend::{LoopOutcome, MetricsBackend, MetricsHandle};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}
