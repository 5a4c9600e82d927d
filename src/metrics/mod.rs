//! Self-observability of the reporter, exposed in Prometheus format.
//!
//! Counts submissions, datapoints and skipped metrics per reporting cycle.

mod recorder;

pub use recorder::{MetricsRecorder, ReporterMetrics};
