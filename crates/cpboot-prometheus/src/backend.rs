use std::sync::Arc;

use prometheus::{CounterVec, Encoder, Opts, Registry, TextEncoder, proto::MetricFamily};

use cpboot_core::{LoopOutcome, MetricsBackend};

const NAMESPACE: &str = "cpboot";

/// Prometheus implementation of [`MetricsBackend`].
///
/// Label values are bounded: `controller` is one of the eight controller kinds, `outcome`
/// one of [`LoopOutcome`], `stage` one of the startup failure stages.
#[derive(Clone)]
pub struct PrometheusMetrics {
    loops_started: CounterVec,
    loop_exits: CounterVec,
    startup_failures: CounterVec,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Register the cpboot counters in `registry`.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let loops_started = counter(
            &registry,
            "loops_started_total",
            "Control loops handed to the supervisor",
            &["controller"],
        )?;
        let loop_exits = counter(
            &registry,
            "loop_exits_total",
            "Control loop exits by outcome",
            &["controller", "outcome"],
        )?;
        let startup_failures = counter(
            &registry,
            "startup_failures_total",
            "Control loops that failed to start, by failing stage",
            &["controller", "stage"],
        )?;

        Ok(Self {
            loops_started,
            loop_exits,
            startup_failures,
            registry,
        })
    }

    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn encode_text(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buf = Vec::new();
        encoder.encode(&self.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

fn counter(
    registry: &Registry,
    name: &str,
    help: &str,
    labels: &[&str],
) -> Result<CounterVec, prometheus::Error> {
    let vec = CounterVec::new(Opts::new(name, help).namespace(NAMESPACE), labels)?;
    registry.register(Box::new(vec.clone()))?;
    Ok(vec)
}

impl MetricsBackend for PrometheusMetrics {
    fn record_loop_started(&self, controller: &str) {
        self.loops_started.with_label_values(&[controller]).inc();
    }

    fn record_loop_exited(&self, controller: &str, outcome: LoopOutcome) {
        self.loop_exits
            .with_label_values(&[controller, outcome.as_label()])
            .inc();
    }

    fn record_startup_failure(&self, controller: &str, stage: &str) {
        self.startup_failures
            .with_label_values(&[controller, stage])
            .inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family<'a>(families: &'a [MetricFamily], name: &str) -> &'a MetricFamily {
        families
            .iter()
            .find(|f| f.name() == name)
            .unwrap_or_else(|| panic!("metric {name} not found"))
    }

    #[test]
    fn started_loops_are_counted_per_controller() {
        let metrics = PrometheusMetrics::new().unwrap();

        metrics.record_loop_started("namespace");
        metrics.record_loop_started("scheduler");
        metrics.record_loop_started("scheduler");

        let families = metrics.gather();
        assert_eq!(family(&families, "cpboot_loops_started_total").get_metric().len(), 2);
        assert_eq!(
            metrics.loops_started.with_label_values(&["scheduler"]).get(),
            2.0
        );
    }

    #[test]
    fn exits_are_split_by_outcome() {
        let metrics = PrometheusMetrics::new().unwrap();

        metrics.record_loop_exited("endpoint", LoopOutcome::Canceled);
        metrics.record_loop_exited("endpoint", LoopOutcome::Failed);
        metrics.record_loop_exited("endpoint", LoopOutcome::Failed);

        assert_eq!(
            metrics
                .loop_exits
                .with_label_values(&["endpoint", "failed"])
                .get(),
            2.0
        );
        let families = metrics.gather();
        assert_eq!(family(&families, "cpboot_loop_exits_total").get_metric().len(), 2);
    }

    #[test]
    fn startup_failures_carry_stage() {
        let metrics = PrometheusMetrics::new().unwrap();

        metrics.record_startup_failure("scheduler", "decode");
        metrics.record_startup_failure("volume-recycler", "probe");

        let text = metrics.encode_text().unwrap();
        assert!(text.contains(r#"cpboot_startup_failures_total{controller="scheduler",stage="decode"} 1"#));
        assert!(text.contains(r#"controller="volume-recycler",stage="probe""#));
    }

    #[test]
    fn registering_twice_in_one_registry_fails() {
        let registry = Arc::new(Registry::new());
        PrometheusMetrics::new_with_registry(registry.clone()).unwrap();
        assert!(PrometheusMetrics::new_with_registry(registry).is_err());
    }
}
