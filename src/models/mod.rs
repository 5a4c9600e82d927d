pub mod datapoint;
pub mod snapshot;
pub mod unit;

// Re-export so callers can do "use crate::models::{Snapshot, PutMetricData};"
pub use datapoint::{Datapoint, DimensionSet, PutMetricData, StatisticSet};
pub use snapshot::{Kind, Snapshot, Snapshots};
pub use unit::Unit;
