//! Snapshot dispatch and datapoint assembly.
//!
//! A [`Reporter`] receives the snapshots of every registered metric, routes
//! each one to the translator for its kind and submits the resulting fields as
//! one batched put-metric-data call. A metric that cannot be translated or
//! submitted is logged and skipped; it never aborts the rest of the cycle.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::ReporterConfig;
use crate::metrics::MetricsRecorder;
use crate::models::{DimensionSet, Kind, PutMetricData, Snapshot, Snapshots, Unit};
use crate::naming::{self, NameError};
use crate::translators::{FieldMap, ShapingError, Translator, TranslatorTable};
use crate::transport::{MetricsClient, TransportError};
use crate::utils::log_throttle::LogThrottle;

const SKIP_LOG_WINDOW: Duration = Duration::from_secs(300);

/// Why a single metric was not submitted.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Name(#[from] NameError),
    #[error(transparent)]
    Shaping(#[from] ShapingError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ReportError {
    /// Label used for the `result` of the submissions counter, or the
    /// `reason` of the skipped counter when nothing was submitted.
    pub fn label(&self) -> &'static str {
        match self {
            ReportError::Name(_) => "name_error",
            ReportError::Shaping(_) => "shaping_error",
            ReportError::Transport(_) => "transport_error",
        }
    }
}

/// What happened during one call to [`Reporter::report`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Metrics whose batch the transport accepted.
    pub submitted: usize,
    /// Datapoints in those batches.
    pub datapoints: usize,
    /// Metrics with an unknown kind or without any field to export.
    pub skipped: usize,
    /// Metrics that failed to translate, decompose or submit.
    pub failed: usize,
}

/// Converts metric snapshots into datapoints and submits them.
pub struct Reporter {
    config: ReporterConfig,
    client: Arc<dyn MetricsClient>,
    translators: TranslatorTable,
    recorder: Option<Arc<dyn MetricsRecorder>>,
    log_throttle: LogThrottle,
    refresh_interval: Duration,
}

impl Reporter {
    pub fn new(config: ReporterConfig, client: Arc<dyn MetricsClient>) -> Self {
        Reporter {
            refresh_interval: config.refresh_interval(),
            config,
            client,
            translators: TranslatorTable::new(),
            recorder: None,
            log_throttle: LogThrottle::new(SKIP_LOG_WINDOW),
        }
    }

    /// Record submissions, skips and cycle durations into `recorder`.
    pub fn with_recorder(mut self, recorder: Arc<dyn MetricsRecorder>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn region(&self) -> &str {
        &self.config.region
    }

    pub fn namespace(&self) -> &str {
        &self.config.namespace
    }

    pub fn dimensions(&self) -> &DimensionSet {
        &self.config.dimensions
    }

    pub fn headers(&self) -> &[String] {
        &self.config.headers
    }

    /// How often the scheduler should call [`Reporter::report`].
    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    pub fn set_refresh_interval(&mut self, interval: Duration) {
        self.refresh_interval = interval;
    }

    /// Translate and submit every snapshot, visiting each entry exactly once.
    ///
    /// Snapshots are copied before translation, so `objects` is never modified.
    pub async fn report(&self, objects: &Snapshots) -> ReportSummary {
        let started = Instant::now();
        let mut summary = ReportSummary::default();

        for (name, snapshot) in objects {
            let kind = Kind::of(snapshot);
            let Some(translator) = self.translators.get(kind) else {
                self.skip_unknown(name);
                summary.skipped += 1;
                continue;
            };

            match self.dump(name, translator, snapshot.clone()).await {
                Ok(0) => {
                    debug!("Metric '{}' has no fields to export, skipping", name);
                    self.record_skipped("empty");
                    summary.skipped += 1;
                }
                Ok(datapoints) => {
                    if let Some(recorder) = &self.recorder {
                        recorder.record_submission("ok", datapoints);
                    }
                    summary.submitted += 1;
                    summary.datapoints += datapoints;
                }
                Err(err) => {
                    self.log_failure(name, kind, &err);
                    match &err {
                        ReportError::Transport(_) => {
                            if let Some(recorder) = &self.recorder {
                                recorder.record_submission(err.label(), 0);
                            }
                        }
                        // nothing reached the transport
                        ReportError::Name(_) | ReportError::Shaping(_) => {
                            self.record_skipped(err.label())
                        }
                    }
                    summary.failed += 1;
                }
            }
        }

        if let Some(recorder) = &self.recorder {
            recorder.record_cycle_duration(started.elapsed().as_secs_f64());
        }
        debug!(
            submitted = summary.submitted,
            datapoints = summary.datapoints,
            skipped = summary.skipped,
            failed = summary.failed,
            "reporting cycle finished"
        );
        summary
    }

    /// Translate one snapshot and submit it. Returns the number of datapoints sent.
    async fn dump(
        &self,
        name: &str,
        translator: &dyn Translator,
        snapshot: Snapshot,
    ) -> Result<usize, ReportError> {
        debug!(
            metric = name,
            kind = %translator.kind(),
            "dump_{}: {}",
            translator.kind(),
            serde_json::to_string(&snapshot).unwrap_or_default()
        );

        let fields = translator.translate(snapshot)?;
        let request = self.assemble(name, fields, Utc::now())?;
        if request.is_empty() {
            return Ok(0);
        }

        self.client.put_metric_data(&request).await?;
        Ok(request.len())
    }

    /// Build the batch for one metric: `<leaf>.<field>` names with their values,
    /// the base dimensions overlaid with those decoded from `name`, unit `None`.
    pub fn assemble(
        &self,
        name: &str,
        fields: FieldMap,
        timestamp: DateTime<Utc>,
    ) -> Result<PutMetricData, NameError> {
        let decomposed = naming::decompose(name, &self.config.headers)?;

        let mut dimensions = self.config.dimensions.clone();
        dimensions.extend(decomposed.dimensions);

        // one pass keeps names and values positionally aligned
        let (metric_names, values): (Vec<String>, Vec<_>) = fields
            .into_iter()
            .map(|(field, value)| (format!("{}.{}", decomposed.leaf, field), value))
            .unzip();

        Ok(PutMetricData {
            namespace: self.config.namespace.clone(),
            metric_names,
            values,
            timestamp,
            unit: Unit::None,
            dimensions,
            statistics: None,
        })
    }

    fn skip_unknown(&self, name: &str) {
        self.record_skipped("unknown_kind");
        if let Some(suppressed_count) = self.log_throttle.should_emit(name) {
            debug!(
                event_name = "reporter.dispatch.unknown_kind",
                event_domain = "reporter",
                metric = name,
                suppressed_count,
                "no translator for metric kind, skipping"
            );
        }
    }

    fn record_skipped(&self, reason: &str) {
        if let Some(recorder) = &self.recorder {
            recorder.record_skipped(reason);
        }
    }

    fn log_failure(&self, name: &str, kind: Kind, err: &ReportError) {
        match err {
            ReportError::Transport(e) => error!(
                event_name = "reporter.dispatch.transport_failed",
                event_domain = "reporter",
                metric = name,
                kind = %kind,
                client = self.client.get_name(),
                "put-metric-data failed: {}",
                e
            ),
            ReportError::Shaping(e) => warn!(
                event_name = "reporter.dispatch.shaping_failed",
                event_domain = "reporter",
                metric = name,
                kind = %kind,
                "snapshot could not be translated: {}",
                e
            ),
            ReportError::Name(e) => warn!(
                event_name = "reporter.dispatch.name_failed",
                event_domain = "reporter",
                metric = name,
                kind = %kind,
                "metric name could not be decomposed: {}",
                e
            ),
        }
    }
}
