use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

/// The point-in-time statistics of one named metric, as handed over by the
/// collection side. Always carries a `kind` field naming the metric family.
pub type Snapshot = Map<String, Value>;

/// Metric name -> snapshot, one entry per metric registered at the source.
pub type Snapshots = BTreeMap<String, Snapshot>;

/// Name of the field every snapshot uses to tag its metric family.
pub const KIND_FIELD: &str = "kind";

/// The closed set of metric families a snapshot can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Histogram,
    Meter,
    Counter,
    Gauge,
    Unknown,
}

impl Kind {
    /// Every kind that has a translator.
    pub const KNOWN: [Kind; 4] = [Kind::Histogram, Kind::Meter, Kind::Counter, Kind::Gauge];

    /// Maps a `kind` tag to its family. Unrecognized tags are `Unknown`.
    pub fn from_tag(tag: &str) -> Kind {
        match tag {
            "histogram" => Kind::Histogram,
            "meter" => Kind::Meter,
            "counter" => Kind::Counter,
            "gauge" => Kind::Gauge,
            _ => Kind::Unknown,
        }
    }

    /// Reads the `kind` tag of a snapshot, defaulting to `Unknown` when the
    /// field is absent or not a string.
    pub fn of(snapshot: &Snapshot) -> Kind {
        snapshot
            .get(KIND_FIELD)
            .and_then(Value::as_str)
            .map(Kind::from_tag)
            .unwrap_or(Kind::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Histogram => "histogram",
            Kind::Meter => "meter",
            Kind::Counter => "counter",
            Kind::Gauge => "gauge",
            Kind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
