use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::file_source::{FileSource, FileSourceConfig};
use crate::models::Snapshots;

/// The snapshot sources. We differentiate them via a "type" tag in the YAML.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
#[serde(tag = "type")]
pub enum SourceConfig {
    #[serde(rename = "file")]
    File(FileSourceConfig),
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("error reading snapshots from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("error parsing snapshots from {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Produces, on demand, the current snapshot of every registered metric.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn snapshot(&self) -> Result<Snapshots, SourceError>;
}

/// Any closure returning snapshots is a source; handy for embedding the
/// reporter next to an in-process metrics registry.
#[async_trait]
impl<F> SnapshotSource for F
where
    F: Fn() -> Snapshots + Send + Sync,
{
    async fn snapshot(&self) -> Result<Snapshots, SourceError> {
        Ok(self())
    }
}

/// Creates a concrete source based on the SourceConfig.
pub fn create_source(config: &SourceConfig) -> Arc<dyn SnapshotSource> {
    match config {
        SourceConfig::File(cfg) => {
            info!("Reading snapshots from file '{}'", cfg.path.display());
            Arc::new(FileSource::new(cfg))
        }
    }
}
