use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::{
    http_client::{HttpMetricsClient, HttpTransportConfig},
    log_client::{LogMetricsClient, LogTransportConfig},
};
use crate::models::PutMetricData;

/// The transport backends. We differentiate them via a "type" tag in the YAML.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
#[serde(tag = "type")]
pub enum TransportConfig {
    #[serde(rename = "http")]
    Http(HttpTransportConfig),
    #[serde(rename = "log")]
    Log(LogTransportConfig),
}

/// Everything that can go wrong while submitting a batch to the backend.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("error sending request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status code {status}: {body}")]
    Status { status: u16, body: String },
    #[error("error encoding request body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("invalid transport option '{name}': {reason}")]
    InvalidOption { name: String, reason: String },
}

/// A connected client for the monitoring backend's put-metric-data call.
///
/// Implementations must tolerate concurrent submissions from overlapping
/// reporting cycles.
#[async_trait]
pub trait MetricsClient: Send + Sync {
    fn get_name(&self) -> &str;
    fn get_type(&self) -> &str;
    async fn put_metric_data(&self, request: &PutMetricData) -> Result<(), TransportError>;
}

/// Creates a concrete client based on the TransportConfig.
pub fn create_client(
    config: &TransportConfig,
    region: &str,
) -> Result<Arc<dyn MetricsClient>, TransportError> {
    let client: Arc<dyn MetricsClient> = match config {
        TransportConfig::Http(cfg) => Arc::new(HttpMetricsClient::new(cfg, region)?),
        TransportConfig::Log(cfg) => Arc::new(LogMetricsClient::new(cfg)),
    };
    info!(
        "Created '{}' transport client of type '{}' for region '{}'",
        client.get_name(),
        client.get_type(),
        region
    );
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_create_log_client() {
        let client = create_client(&TransportConfig::Log(LogTransportConfig::default()), "eu-west-1")
            .expect("log client is infallible");
        assert_eq!(client.get_type(), "log");
    }

    #[test]
    fn test_create_http_client_rejects_bad_option() {
        let config = TransportConfig::Http(HttpTransportConfig {
            endpoint: None,
            timeout_in_ms: 1000,
            options: BTreeMap::from([("bad header".to_string(), "x".to_string())]),
        });
        let result = create_client(&config, "eu-west-1");
        assert!(matches!(result, Err(TransportError::InvalidOption { .. })));
    }
}
