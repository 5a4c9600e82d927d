use std::path::PathBuf;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::base::{SnapshotSource, SourceError};
use crate::models::Snapshots;

/// Config for a source that re-reads a JSON snapshot document every cycle.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct FileSourceConfig {
    pub path: PathBuf,
}

/// Reads `{"<metric name>": {"kind": ..., ...}, ...}` from a file, typically
/// written periodically by the instrumented application.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(config: &FileSourceConfig) -> Self {
        Self {
            path: config.path.clone(),
        }
    }
}

#[async_trait]
impl SnapshotSource for FileSource {
    async fn snapshot(&self) -> Result<Snapshots, SourceError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        let snapshots: Snapshots =
            serde_json::from_str(&raw).map_err(|source| SourceError::Parse {
                path: self.path.clone(),
                source,
            })?;
        debug!(
            "Read {} snapshot(s) from '{}'",
            snapshots.len(),
            self.path.display()
        );
        Ok(snapshots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Kind;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_snapshot_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"app1:worker_meter": {{"kind": "meter", "count": 5, "mean": 0.27}},
                "version": {{"kind": "gauge", "value": "version 1.0"}}}}"#
        )
        .unwrap();

        let source = FileSource::new(&FileSourceConfig {
            path: file.path().to_path_buf(),
        });
        let snapshots = source.snapshot().await.unwrap();

        assert_eq!(snapshots.len(), 2);
        assert_eq!(Kind::of(&snapshots["app1:worker_meter"]), Kind::Meter);
        assert_eq!(snapshots["version"]["value"], "version 1.0");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = FileSource::new(&FileSourceConfig {
            path: PathBuf::from("/nonexistent/snapshots.json"),
        });
        assert!(matches!(
            source.snapshot().await,
            Err(SourceError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let source = FileSource::new(&FileSourceConfig {
            path: file.path().to_path_buf(),
        });
        assert!(matches!(
            source.snapshot().await,
            Err(SourceError::Parse { .. })
        ));
    }
}
