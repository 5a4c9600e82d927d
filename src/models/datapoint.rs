use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::unit::Unit;

/// Dimension name -> dimension value attached to every datapoint of a batch.
pub type DimensionSet = BTreeMap<String, String>;

/// Pre-aggregated statistics the backend accepts in place of a single value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticSet {
    pub sample_count: f64,
    pub sum: f64,
    pub minimum: f64,
    pub maximum: f64,
}

/// One batched put-metric-data call for a single source metric.
///
/// `metric_names` and `values` are positional: the value at index `i`
/// belongs to the metric name at index `i`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PutMetricData {
    pub namespace: String,
    pub metric_names: Vec<String>,
    pub values: Vec<Value>,
    pub timestamp: DateTime<Utc>,
    pub unit: Unit,
    pub dimensions: DimensionSet,
    pub statistics: Option<StatisticSet>,
}

/// A borrowed view of a single datapoint inside a [`PutMetricData`] batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Datapoint<'a> {
    pub metric_name: &'a str,
    pub value: &'a Value,
}

impl PutMetricData {
    /// Number of datapoints in the batch.
    pub fn len(&self) -> usize {
        self.metric_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metric_names.is_empty()
    }

    /// Pairs each metric name with its value.
    pub fn datapoints(&self) -> impl Iterator<Item = Datapoint<'_>> {
        self.metric_names
            .iter()
            .zip(self.values.iter())
            .map(|(metric_name, value)| Datapoint {
                metric_name: metric_name.as_str(),
                value,
            })
    }
}
