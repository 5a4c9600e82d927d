//! Shared application state.
//!
//! Contains the state shared by the HTTP handlers of the health and
//! self-metrics listener.

use crate::config::ConfigV1;
use crate::metrics::ReporterMetrics;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Counters and histograms recorded by the reporter.
    pub metrics: ReporterMetrics,
}
