use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::DimensionSet;

fn default_interval() -> u64 {
    5
}

/// Construction parameters of a reporter.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct ReporterConfig {
    /// Locality of the monitoring backend, e.g. "eu-west-1".
    pub region: String,
    /// Logical grouping every datapoint is submitted under.
    pub namespace: String,
    /// Dimensions attached to every datapoint.
    #[serde(default)]
    pub dimensions: DimensionSet,
    /// Seconds between reporting cycles.
    #[serde(default = "default_interval")]
    pub interval: u64,
    /// Dimension keys filled, left to right, from the leading segments of
    /// colon-delimited metric names.
    #[serde(default)]
    pub headers: Vec<String>,
}

impl ReporterConfig {
    pub fn new(
        region: impl Into<String>,
        namespace: impl Into<String>,
        dimensions: DimensionSet,
    ) -> Self {
        ReporterConfig {
            region: region.into(),
            namespace: namespace.into(),
            dimensions,
            interval: default_interval(),
            headers: Vec::new(),
        }
    }

    pub fn with_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    /// Rejects settings the periodic driver cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        if self.interval == 0 {
            return Err("reporter.interval must be at least 1 second".to_string());
        }
        Ok(())
    }
}

/// Optional listener for health and self-metrics endpoints.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct ServerConfig {
    pub bind_address: Option<String>,
}
