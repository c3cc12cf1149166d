//! Prometheus backend for the bootstrap metrics of cpboot.
//!
//! [`PrometheusMetrics`] implements [`cpboot_core::MetricsBackend`]; hand it to the
//! sequencer and the launcher, then expose [`PrometheusMetrics::gather`] (or
//! [`PrometheusMetrics::encode_text`]) from whatever HTTP stack the process already has.
//!
//! ```rust
//! use std::sync::Arc;
//! use cpboot_core::MetricsHandle;
//! use cpboot_prometheus::PrometheusMetrics;
//!
//! # fn main() -> Result<(), prometheus::Error> {
//! let metrics = PrometheusMetrics::new()?;
//! let handle: MetricsHandle = Arc::new(metrics.clone());
//! handle.record_loop_started("scheduler");
//! assert!(metrics.encode_text()?.contains("cpboot_loops_started_total"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `cpboot_loops_started_total{controller}`
//! - `cpboot_loop_exits_total{controller, outcome}`
//! - `cpboot_startup_failures_total{controller, stage}`
mod backend;
pub use backend::PrometheusMetrics;
