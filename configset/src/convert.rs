//! Strict conversion of YAML text into the canonical JSON tree.
//!
//! Both configuration files and override values funnel through
//! [`convert`]. The conversion is deliberately strict: anything without a
//! lossless JSON representation is rejected rather than approximated, so
//! the aggregate document can be merged, patched and serialized without
//! further transformation.
//!
//! `serde_yaml` already refuses multi-document streams and duplicate
//! mapping keys; this module adds the remaining rejections (non-string
//! keys, tagged values, non-finite numbers) and one canonicalization:
//! whole-valued floats such as `1.0` become JSON integers, matching the
//! canonical encoding of the aggregate document.

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Error produced when a piece of YAML text has no canonical tree form.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The text is not parseable YAML, contains more than one document, or
    /// repeats a mapping key. The parser diagnostic (with line/column where
    /// available) is preserved verbatim.
    #[error(transparent)]
    Parse(#[from] serde_yaml::Error),

    /// A mapping key is not a string.
    #[error("mapping key must be a string, found {kind}")]
    NonStringKey {
        /// What the key was instead.
        kind: &'static str,
    },

    /// A tagged value (e.g. `!!binary`, custom tags) has no JSON form.
    #[error("tagged value {tag:?} has no JSON representation")]
    Tagged {
        /// The tag as written.
        tag: String,
    },

    /// A non-finite number has no JSON form.
    #[error("number {value} has no JSON representation")]
    NonFiniteNumber {
        /// The offending value.
        value: f64,
    },

    /// The input bytes are not valid UTF-8 text. Produced by callers that
    /// read raw bytes before converting; text never lands here lossily.
    #[error("invalid UTF-8 text: {source}")]
    InvalidEncoding {
        /// Where the bytes stop being UTF-8.
        #[source]
        source: std::str::Utf8Error,
    },
}

/// Convert one YAML document into a canonical [`Value`].
///
/// # Errors
///
/// Returns a [`ConvertError`] if the text is not valid single-document
/// YAML or contains a construct with no lossless JSON representation.
pub fn convert(text: &str) -> Result<Value, ConvertError> {
    let document: serde_yaml::Value = serde_yaml::from_str(text)?;
    from_yaml(document)
}

fn from_yaml(value: serde_yaml::Value) -> Result<Value, ConvertError> {
    match value {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(b)),
        serde_yaml::Value::Number(n) => from_number(&n).map(Value::Number),
        serde_yaml::Value::String(s) => Ok(Value::String(s)),
        serde_yaml::Value::Sequence(items) => items
            .into_iter()
            .map(from_yaml)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(mapping) => {
            let mut object = Map::new();
            for (key, entry) in mapping {
                let key = match key {
                    serde_yaml::Value::String(key) => key,
                    other => {
                        return Err(ConvertError::NonStringKey {
                            kind: kind_name(&other),
                        })
                    }
                };
                object.insert(key, from_yaml(entry)?);
            }
            Ok(Value::Object(object))
        }
        serde_yaml::Value::Tagged(tagged) => Err(ConvertError::Tagged {
            tag: tagged.tag.to_string(),
        }),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn from_number(n: &serde_yaml::Number) -> Result<Number, ConvertError> {
    if let Some(i) = n.as_i64() {
        return Ok(Number::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Number::from(u));
    }
    let f = n.as_f64().unwrap_or(f64::NAN);
    // Whole floats read back as integers: YAML `1.0` dumps as `1`.
    if f.is_finite() && f.fract() == 0.0 && f >= -(2f64.powi(63)) && f < 2f64.powi(63) {
        return Ok(Number::from(f as i64));
    }
    Number::from_f64(f).ok_or(ConvertError::NonFiniteNumber { value: f })
}

fn kind_name(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}
