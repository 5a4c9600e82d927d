use std::collections::HashMap;

use serde_json::{Map, Value};
use thiserror::Error;

use super::histogram::HistogramTranslator;
use super::passthrough::PassthroughTranslator;
use crate::models::snapshot::KIND_FIELD;
use crate::models::{Kind, Snapshot};

/// Flat field name -> value map produced by a translator. Every entry becomes
/// one datapoint named `<leaf>.<field>`.
pub type FieldMap = Map<String, Value>;

/// Raised when a snapshot does not have the structure its kind promises.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapingError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),
    #[error("field '{field}' is malformed: {reason}")]
    MalformedField {
        field: &'static str,
        reason: &'static str,
    },
}

/// Turns the snapshot of one metric family into a flat field map.
pub trait Translator: Send + Sync {
    fn kind(&self) -> Kind;

    /// Consumes a private copy of the snapshot. The `kind` tag never appears
    /// in the returned map.
    fn translate(&self, snapshot: Snapshot) -> Result<FieldMap, ShapingError>;
}

/// Removes the `kind` tag; every translator starts with this.
pub(crate) fn strip_kind(mut snapshot: Snapshot) -> Snapshot {
    snapshot.remove(KIND_FIELD);
    snapshot
}

/// Create the translator for a kind, if that kind can be exported.
pub fn create_translator(kind: Kind) -> Option<Box<dyn Translator>> {
    match kind {
        Kind::Histogram => Some(Box::new(HistogramTranslator)),
        Kind::Meter | Kind::Counter | Kind::Gauge => Some(Box::new(PassthroughTranslator::new(kind))),
        Kind::Unknown => None,
    }
}

/// Kind -> translator lookup, built once when the reporter is created.
pub struct TranslatorTable {
    translators: HashMap<Kind, Box<dyn Translator>>,
}

impl TranslatorTable {
    pub fn new() -> Self {
        let translators = Kind::KNOWN
            .iter()
            .filter_map(|kind| create_translator(*kind).map(|t| (*kind, t)))
            .collect();
        TranslatorTable { translators }
    }

    pub fn get(&self, kind: Kind) -> Option<&dyn Translator> {
        self.translators.get(&kind).map(|t| t.as_ref())
    }
}

impl Default for TranslatorTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_known_kind() {
        let table = TranslatorTable::new();
        for kind in Kind::KNOWN {
            let translator = table.get(kind).expect("translator missing");
            assert_eq!(translator.kind(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_has_no_translator() {
        assert!(TranslatorTable::new().get(Kind::Unknown).is_none());
        assert!(create_translator(Kind::Unknown).is_none());
    }
}
