use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use super::base::{MetricsClient, TransportError};
use crate::models::PutMetricData;

const AMZ_JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.0";
const AMZ_TARGET_HEADER: &str = "x-amz-target";
const PUT_METRIC_DATA_TARGET: &str = "GraniteServiceVersion20100801.PutMetricData";

fn default_timeout_in_ms() -> u64 {
    5000
}

/// Config for the HTTP put-metric-data client.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct HttpTransportConfig {
    /// Overrides the regional endpoint, e.g. for a local collector or proxy.
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_in_ms")]
    pub timeout_in_ms: u64,
    /// Forwarded untouched as request headers (credentials, session tokens, ...).
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

/// Submits batches to a CloudWatch-compatible endpoint using the JSON 1.0 protocol.
pub struct HttpMetricsClient {
    endpoint: String,
    client: reqwest::Client,
}

/// The regional monitoring endpoint used when none is configured.
pub fn regional_endpoint(region: &str) -> String {
    format!("https://monitoring.{}.amazonaws.com/", region)
}

impl HttpMetricsClient {
    pub fn new(config: &HttpTransportConfig, region: &str) -> Result<Self, TransportError> {
        let endpoint = config
            .endpoint
            .clone()
            .unwrap_or_else(|| regional_endpoint(region));
        info!("Creating HttpMetricsClient for endpoint '{}'", endpoint);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_in_ms))
            .default_headers(forwarded_headers(&config.options)?)
            .build()?;

        Ok(Self { endpoint, client })
    }
}

fn forwarded_headers(options: &BTreeMap<String, String>) -> Result<HeaderMap, TransportError> {
    let mut headers = HeaderMap::with_capacity(options.len());
    for (name, value) in options {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| TransportError::InvalidOption {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| TransportError::InvalidOption {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}

/// Builds the PutMetricData request document. Every datapoint of the batch
/// shares the timestamp, unit and dimensions.
pub fn build_body(request: &PutMetricData) -> Value {
    let dimensions: Vec<Value> = request
        .dimensions
        .iter()
        .map(|(name, value)| json!({ "Name": name, "Value": value }))
        .collect();

    let metric_data: Vec<Value> = request
        .datapoints()
        .map(|dp| {
            let mut datum = Map::with_capacity(6);
            datum.insert("MetricName".to_string(), Value::from(dp.metric_name));
            datum.insert("Value".to_string(), dp.value.clone());
            datum.insert(
                "Timestamp".to_string(),
                Value::from(request.timestamp.timestamp()),
            );
            datum.insert("Unit".to_string(), Value::from(request.unit.as_str()));
            datum.insert("Dimensions".to_string(), Value::Array(dimensions.clone()));
            if let Some(stats) = &request.statistics {
                datum.insert(
                    "StatisticValues".to_string(),
                    json!({
                        "SampleCount": stats.sample_count,
                        "Sum": stats.sum,
                        "Minimum": stats.minimum,
                        "Maximum": stats.maximum,
                    }),
                );
            }
            Value::Object(datum)
        })
        .collect();

    json!({
        "Namespace": request.namespace,
        "MetricData": metric_data,
    })
}

#[async_trait]
impl MetricsClient for HttpMetricsClient {
    fn get_name(&self) -> &str {
        &self.endpoint
    }

    fn get_type(&self) -> &str {
        "http"
    }

    async fn put_metric_data(&self, request: &PutMetricData) -> Result<(), TransportError> {
        let body = serde_json::to_vec(&build_body(request))?;
        debug!(
            "Sending PutMetricData with {} datapoint(s) to: {}",
            request.len(),
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, AMZ_JSON_CONTENT_TYPE)
            .header(AMZ_TARGET_HEADER, PUT_METRIC_DATA_TARGET)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(TransportError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}
