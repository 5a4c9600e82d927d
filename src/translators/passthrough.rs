use super::base::{strip_kind, FieldMap, ShapingError, Translator};
use crate::models::{Kind, Snapshot};

/// Meters, counters and gauges export every field as-is.
///
/// Gauge values are not checked: a gauge may carry a string such as a version,
/// and it is up to the backend to accept or reject it.
pub struct PassthroughTranslator {
    kind: Kind,
}

impl PassthroughTranslator {
    pub fn new(kind: Kind) -> Self {
        PassthroughTranslator { kind }
    }
}

impl Translator for PassthroughTranslator {
    fn kind(&self) -> Kind {
        self.kind
    }

    fn translate(&self, snapshot: Snapshot) -> Result<FieldMap, ShapingError> {
        Ok(strip_kind(snapshot))
    }
}
