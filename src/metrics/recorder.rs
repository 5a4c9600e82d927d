//! Metrics recording implementation using Prometheus.

use prometheus::{
    register_counter_vec_with_registry, register_histogram_with_registry,
    register_int_counter_with_registry, CounterVec, Encoder, Histogram, IntCounter, Opts,
    Registry, TextEncoder,
};
use std::sync::Arc;

/// Trait for recording what the reporter did during a cycle.
pub trait MetricsRecorder: Send + Sync + 'static {
    /// Records one put-metric-data attempt with its outcome.
    fn record_submission(&self, result: &str, datapoints: usize);

    /// Records a metric that was not submitted, with the reason.
    fn record_skipped(&self, reason: &str);

    /// Records the duration of a whole reporting cycle.
    fn record_cycle_duration(&self, duration_secs: f64);
}

/// Prometheus metrics collector.
#[derive(Clone)]
pub struct ReporterMetrics {
    registry: Arc<Registry>,

    submissions_total: CounterVec,
    datapoints_total: IntCounter,
    skipped_total: CounterVec,
    cycle_duration_seconds: Histogram,
}

impl ReporterMetrics {
    /// Creates a new metrics instance with its own Prometheus registry.
    pub fn new() -> Self {
        let registry = Arc::new(Registry::new());

        let submissions_total = register_counter_vec_with_registry!(
            Opts::new(
                "reporter_submissions_total",
                "Total number of put-metric-data submissions"
            ),
            &["result"],
            registry.clone()
        )
        .expect("Failed to register reporter_submissions_total");

        let datapoints_total = register_int_counter_with_registry!(
            Opts::new(
                "reporter_datapoints_total",
                "Total number of datapoints accepted by the transport"
            ),
            registry.clone()
        )
        .expect("Failed to register reporter_datapoints_total");

        let skipped_total = register_counter_vec_with_registry!(
            Opts::new(
                "reporter_skipped_total",
                "Total number of metrics skipped without a submission"
            ),
            &["reason"],
            registry.clone()
        )
        .expect("Failed to register reporter_skipped_total");

        let cycle_duration_seconds = register_histogram_with_registry!(
            "reporter_cycle_duration_seconds",
            "Duration of a reporting cycle in seconds",
            vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0],
            registry.clone()
        )
        .expect("Failed to register reporter_cycle_duration_seconds");

        ReporterMetrics {
            registry,
            submissions_total,
            datapoints_total,
            skipped_total,
            cycle_duration_seconds,
        }
    }

    /// Renders all metrics in Prometheus text format.
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .expect("Failed to encode metrics");
        String::from_utf8(buffer).expect("Metrics encoding produced invalid UTF-8")
    }
}

impl Default for ReporterMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder for ReporterMetrics {
    fn record_submission(&self, result: &str, datapoints: usize) {
        self.submissions_total.with_label_values(&[result]).inc();
        self.datapoints_total.inc_by(datapoints as u64);
    }

    fn record_skipped(&self, reason: &str) {
        self.skipped_total.with_label_values(&[reason]).inc();
    }

    fn record_cycle_duration(&self, duration_secs: f64) {
        self.cycle_duration_seconds.observe(duration_secs);
    }
}
