use serde_json::Value;

use super::base::{strip_kind, FieldMap, ShapingError, Translator};
use crate::models::{Kind, Snapshot};
use crate::utils::value::label_to_string;

const BUCKETS_FIELD: &str = "histogram";
const PERCENTILE_FIELD: &str = "percentile";

/// Histograms drop their bucket list and flatten `percentile` pairs into
/// `percentile_<label>` fields. Summary statistics pass through.
pub struct HistogramTranslator;

impl Translator for HistogramTranslator {
    fn kind(&self) -> Kind {
        Kind::Histogram
    }

    fn translate(&self, snapshot: Snapshot) -> Result<FieldMap, ShapingError> {
        let mut fields = strip_kind(snapshot);

        // bucket counts have no single-value representation
        fields
            .remove(BUCKETS_FIELD)
            .ok_or(ShapingError::MissingField(BUCKETS_FIELD))?;

        let percentiles = match fields.remove(PERCENTILE_FIELD) {
            Some(Value::Array(pairs)) => pairs,
            Some(_) => {
                return Err(ShapingError::MalformedField {
                    field: PERCENTILE_FIELD,
                    reason: "expected a list of [label, value] pairs",
                })
            }
            None => return Err(ShapingError::MissingField(PERCENTILE_FIELD)),
        };

        for pair in percentiles {
            let [label, value] = into_pair(pair)?;
            let key = format!("percentile_{}", label_to_string(&label));
            if fields.contains_key(&key) {
                return Err(ShapingError::MalformedField {
                    field: PERCENTILE_FIELD,
                    reason: "two pairs map to the same percentile label",
                });
            }
            fields.insert(key, value);
        }

        Ok(fields)
    }
}

fn into_pair(pair: Value) -> Result<[Value; 2], ShapingError> {
    let malformed = ShapingError::MalformedField {
        field: PERCENTILE_FIELD,
        reason: "each entry must be a [label, value] pair",
    };
    match pair {
        Value::Array(items) => <[Value; 2]>::try_from(items).map_err(|_| malformed),
        _ => Err(malformed),
    }
}
