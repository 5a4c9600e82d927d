use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::base::{MetricsClient, TransportError};
use crate::models::PutMetricData;

/// Config for the log transport. It has no options yet.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone, Default)]
pub struct LogTransportConfig {}

/// A client that writes every datapoint to the log instead of a backend.
/// Useful for dry runs and local development.
pub struct LogMetricsClient;

impl LogMetricsClient {
    pub fn new(_config: &LogTransportConfig) -> Self {
        LogMetricsClient
    }
}

#[async_trait]
impl MetricsClient for LogMetricsClient {
    fn get_name(&self) -> &str {
        "log"
    }

    fn get_type(&self) -> &str {
        "log"
    }

    async fn put_metric_data(&self, request: &PutMetricData) -> Result<(), TransportError> {
        let dimensions = serde_json::to_string(&request.dimensions)?;
        for dp in request.datapoints() {
            info!(
                event_name = "transport.log.datapoint",
                event_domain = "transport",
                namespace = request.namespace.as_str(),
                metric_name = dp.metric_name,
                value = %dp.value,
                unit = request.unit.as_str(),
                dimensions = dimensions.as_str(),
                timestamp = %request.timestamp.to_rfc3339(),
                "datapoint"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DimensionSet, Unit};
    use chrono::Utc;
    use serde_json::json;

    #[tokio::test]
    async fn test_log_client_always_succeeds() {
        let client = LogMetricsClient::new(&LogTransportConfig::default());
        let request = PutMetricData {
            namespace: "ns".to_string(),
            metric_names: vec!["gauge.value".to_string()],
            values: vec![json!("version 1.0")],
            timestamp: Utc::now(),
            unit: Unit::None,
            dimensions: DimensionSet::new(),
            statistics: None,
        };
        assert!(client.put_metric_data(&request).await.is_ok());
    }
}
