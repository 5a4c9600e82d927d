#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cloudwatch_reporter::config::{extract, ConfigV1};
use cloudwatch_reporter::models::{PutMetricData, Snapshot, Snapshots};
use cloudwatch_reporter::reporter::Reporter;
use cloudwatch_reporter::transport::{MetricsClient, TransportError};
use figment::{
    providers::{Format, Yaml},
    Figment,
};
use serde_json::Value;

pub const TEST_CONFIG: &str = r#"
version: "1.0.0"
logging:
  level: "debug"
  format: "json"
reporter:
  region: eu-west-1
  namespace: Workers
  interval: 30
  dimensions:
    server: test
  headers:
    - app
transport:
  type: log
source:
  type: file
  path: ./snapshots.json
server:
  bind_address: 127.0.0.1:9464
"#;

pub fn load_test_config() -> ConfigV1 {
    extract(Figment::new().merge(Yaml::string(TEST_CONFIG))).expect("Failed to parse test config YAML")
}

/// Keeps every submitted batch. Batches whose first metric name starts with
/// one of `fail_prefixes` are rejected with a status error instead.
#[derive(Default)]
pub struct RecordingClient {
    pub requests: Mutex<Vec<PutMetricData>>,
    pub attempts: Mutex<Vec<String>>,
    fail_prefixes: Vec<String>,
}

impl RecordingClient {
    pub fn failing_for(prefixes: &[&str]) -> Self {
        RecordingClient {
            fail_prefixes: prefixes.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn requests(&self) -> Vec<PutMetricData> {
        self.requests.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetricsClient for RecordingClient {
    fn get_name(&self) -> &str {
        "recording"
    }

    fn get_type(&self) -> &str {
        "test"
    }

    async fn put_metric_data(&self, request: &PutMetricData) -> Result<(), TransportError> {
        let first = request.metric_names.first().cloned().unwrap_or_default();
        self.attempts.lock().unwrap().push(first.clone());

        if self.fail_prefixes.iter().any(|p| first.starts_with(p.as_str())) {
            return Err(TransportError::Status {
                status: 400,
                body: "Throttling".to_string(),
            });
        }
        self.requests.lock().unwrap().push(request.clone());
        Ok(())
    }
}

pub fn build_reporter(client: Arc<RecordingClient>) -> Reporter {
    let config = load_test_config();
    Reporter::new(config.reporter, client)
}

pub fn snapshot(value: Value) -> Snapshot {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

pub fn snapshots(entries: Vec<(&str, Value)>) -> Snapshots {
    entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), snapshot(value)))
        .collect()
}
