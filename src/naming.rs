//! Decomposition of compound metric names.
//!
//! A metric registered as `app1:worker_meter` is exported as `worker_meter`,
//! with `app1` becoming the value of the first configured dimension key.

use thiserror::Error;

use crate::models::DimensionSet;

/// Separator between the segments of a compound metric name.
pub const DELIMITER: char = ':';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("metric name '{name}' has {segments} segment(s) but {headers} dimension header(s) are configured")]
    TooFewSegments {
        name: String,
        segments: usize,
        headers: usize,
    },
}

/// The leaf of a metric name plus the dimensions its leading segments supply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecomposedName<'a> {
    pub leaf: &'a str,
    pub dimensions: DimensionSet,
}

/// Splits `name` on [`DELIMITER`]. The last segment is the leaf; segment `i`
/// becomes the value of `headers[i]`.
///
/// The leaf itself counts as a segment, so `a:b` satisfies two headers.
pub fn decompose<'a>(name: &'a str, headers: &[String]) -> Result<DecomposedName<'a>, NameError> {
    let parts: Vec<&str> = name.split(DELIMITER).collect();
    if parts.len() < headers.len() {
        return Err(NameError::TooFewSegments {
            name: name.to_string(),
            segments: parts.len(),
            headers: headers.len(),
        });
    }

    let dimensions = headers
        .iter()
        .zip(parts.iter())
        .map(|(header, part)| (header.clone(), part.to_string()))
        .collect();

    // split always yields at least one item
    let leaf = parts.last().copied().unwrap_or(name);

    Ok(DecomposedName { leaf, dimensions })
}
