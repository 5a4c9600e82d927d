pub mod base;
pub mod file_source;

pub use base::{create_source, SnapshotSource, SourceConfig, SourceError};
