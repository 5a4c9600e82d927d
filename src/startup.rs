//! Application startup and the periodic reporting loop.
//!
//! Builds the transport client, snapshot source and reporter from the
//! configuration, optionally serves health and self-metrics endpoints, and
//! reports once per refresh interval until Ctrl-C.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::ConfigV1;
use crate::metrics::ReporterMetrics;
use crate::reporter::{ReportSummary, Reporter};
use crate::routes;
use crate::sources::{create_source, SnapshotSource};
use crate::state::AppState;
use crate::transport::create_client;

/// Runs one reporting cycle. A failing source skips the cycle.
pub async fn run_cycle(reporter: &Reporter, source: &dyn SnapshotSource) -> Option<ReportSummary> {
    match source.snapshot().await {
        Ok(objects) => Some(reporter.report(&objects).await),
        Err(e) => {
            warn!(
                event_name = "startup.cycle.source_failed",
                event_domain = "startup",
                "skipping reporting cycle: {}",
                e
            );
            None
        }
    }
}

/// Initializes and runs the reporter.
///
/// With `once`, performs a single reporting cycle and returns. Otherwise
/// reports on every tick of the refresh interval until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the refresh interval is zero, the transport client
/// cannot be built or the listener fails to bind to the configured address.
pub async fn run(config: Arc<ConfigV1>, once: bool) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = ReporterMetrics::new();
    let client = create_client(&config.transport, &config.reporter.region)?;
    let reporter = Reporter::new(config.reporter.clone(), client)
        .with_recorder(Arc::new(metrics.clone()));
    let source = create_source(&config.source);

    if reporter.refresh_interval().is_zero() {
        return Err("refresh interval must be greater than zero".into());
    }

    if once {
        run_cycle(&reporter, source.as_ref()).await;
        return Ok(());
    }

    if let Some(bind_address) = &config.server.bind_address {
        let state = AppState {
            config: config.clone(),
            metrics: metrics.clone(),
        };
        let app = routes::create_router(state);
        let listener = TcpListener::bind(bind_address).await?;
        info!("Serving health and metrics on {}", bind_address);
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                error!("Health and metrics listener stopped: {}", e);
            }
        });
    }

    info!(
        "Reporting to namespace '{}' in '{}' every {:?}",
        reporter.namespace(),
        reporter.region(),
        reporter.refresh_interval()
    );

    let mut ticker = tokio::time::interval(reporter.refresh_interval());
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                run_cycle(&reporter, source.as_ref()).await;
            }
            _ = &mut shutdown => {
                info!("Received Ctrl-C, stopping reporter");
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReporterConfig;
    use crate::models::{DimensionSet, Snapshots};
    use crate::sources::file_source::FileSourceConfig;
    use crate::sources::{SourceConfig, SourceError};
    use crate::transport::log_client::{LogMetricsClient, LogTransportConfig};
    use crate::transport::TransportConfig;
    use async_trait::async_trait;
    use serde_json::json;

    struct BrokenSource;

    #[async_trait]
    impl SnapshotSource for BrokenSource {
        async fn snapshot(&self) -> Result<Snapshots, SourceError> {
            Err(SourceError::Io {
                path: "/missing".into(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            })
        }
    }

    fn reporter() -> Reporter {
        Reporter::new(
            ReporterConfig::new("eu-west-1", "Workers", DimensionSet::new()),
            Arc::new(LogMetricsClient::new(&LogTransportConfig::default())),
        )
    }

    #[tokio::test]
    async fn test_cycle_reports_closure_source() {
        let source = || {
            let mut objects = Snapshots::new();
            if let serde_json::Value::Object(map) = json!({"kind": "counter", "value": 5}) {
                objects.insert("requests".to_string(), map);
            }
            objects
        };

        let summary = run_cycle(&reporter(), &source).await.unwrap();
        assert_eq!(summary.submitted, 1);
        assert_eq!(summary.datapoints, 1);
    }

    #[tokio::test]
    async fn test_run_rejects_zero_interval() {
        let mut reporter_config = ReporterConfig::new("eu-west-1", "Workers", DimensionSet::new());
        reporter_config.interval = 0;
        let config = ConfigV1 {
            logging: Default::default(),
            reporter: reporter_config,
            transport: TransportConfig::Log(LogTransportConfig::default()),
            source: SourceConfig::File(FileSourceConfig {
                path: "/missing/snapshots.json".into(),
            }),
            server: Default::default(),
        };

        let err = run(Arc::new(config), false).await.unwrap_err();
        assert!(err.to_string().contains("refresh interval"));
    }

    #[tokio::test]
    async fn test_cycle_skipped_when_source_fails() {
        assert!(run_cycle(&reporter(), &BrokenSource).await.is_none());
    }
}
