//! Metrics recording implementation using Prometheus.

use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec,
    Encoder, HistogramVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

/// Trait for recording navigation metrics.
pub trait MetricsRecorder: Clone + Send + Sync + 'static {
    /// Records one guard decision for a target route.
    fn record_navigation_decision(&self, outcome: &str, target: &str);

    /// Records a role lookup and whether it succeeded.
    fn record_role_lookup(&self, result: &str);

    /// Records how long a role lookup took.
    fn record_role_lookup_duration(&self, duration_secs: f64, result: &str);
}

/// Prometheus metrics collector.
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,

    navigation_decisions_total: CounterVec,

    role_lookups_total: CounterVec,
    role_lookup_duration_seconds: HistogramVec,
}

impl Metrics {
    /// Creates a new metrics instance with its own Prometheus registry.
    pub fn new() -> Self {
        let registry = Arc::new(Registry::new());

        let navigation_decisions_total = register_counter_vec_with_registry!(
            Opts::new(
                "navigation_decisions_total",
                "Guard decisions by outcome and target route"
            ),
            &["outcome", "target"],
            registry.clone()
        )
        .expect("Failed to register navigation_decisions_total");

        let role_lookups_total = register_counter_vec_with_registry!(
            Opts::new("role_lookups_total", "Role lookups against the API"),
            &["result"],
            registry.clone()
        )
        .expect("Failed to register role_lookups_total");

        let role_lookup_duration_seconds = register_histogram_vec_with_registry!(
            "role_lookup_duration_seconds",
            "Role lookup duration in seconds",
            &["result"],
            vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0],
            registry.clone()
        )
        .expect("Failed to register role_lookup_duration_seconds");

        Metrics {
            registry,
            navigation_decisions_total,
            role_lookups_total,
            role_lookup_duration_seconds,
        }
    }

    /// Renders all metrics in Prometheus text format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder for Metrics {
    fn record_navigation_decision(&self, outcome: &str, target: &str) {
        self.navigation_decisions_total
            .with_label_values(&[outcome, target])
            .inc();
    }

    fn record_role_lookup(&self, result: &str) {
        self.role_lookups_total.with_label_values(&[result]).inc();
    }

    fn record_role_lookup_duration(&self, duration_secs: f64, result: &str) {
        self.role_lookup_duration_seconds
            .with_label_values(&[result])
            .observe(duration_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_recorded_series() {
        let metrics = Metrics::new();
        metrics.record_navigation_decision("redirect", "admin");
        metrics.record_role_lookup("error");
        metrics.record_role_lookup_duration(0.02, "error");

        let text = metrics.render().expect("metrics render");
        assert!(text.contains(r#"navigation_decisions_total{outcome="redirect",target="admin"} 1"#));
        assert!(text.contains(r#"role_lookups_total{result="error"} 1"#));
        assert!(text.contains("role_lookup_duration_seconds_bucket"));
    }
}
