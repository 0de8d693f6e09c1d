//! Applies override pairs to the aggregate document.
//!
//! Pairs apply one at a time in a stable path order: sorted by dotted
//! path, so a parent path applies before its children and a nested
//! override survives a whole-object write higher up. Exact duplicate
//! paths keep their input order, so the later of two writes to the same
//! path wins. The first failure aborts the fold; pairs already applied
//! stay applied to the candidate document. `ConfigSet::load` only
//! publishes the candidate on overall success, so a partially patched
//! document is never observable.

use serde_json::{Map, Value};

use crate::convert;
use crate::environment::KEY_PREFIX;
use crate::error::{Error, Result};
use crate::path::{self, Segment};

/// Fold `pairs` into `document`, ordered by dotted path.
///
/// The sort puts parent paths before their children and is stable, so
/// exact duplicate paths keep last-write-wins.
///
/// # Errors
///
/// Returns [`Error::OverrideConversion`] if a raw value is not valid YAML,
/// and [`Error::Path`] for an empty path or a structural type conflict.
pub(crate) fn apply_overrides(document: &mut Value, pairs: &[(String, String)]) -> Result<()> {
    let mut ordered: Vec<&(String, String)> = pairs.iter().collect();
    ordered.sort_by(|a, b| a.0.cmp(&b.0));
    for (key, value) in ordered {
        let converted =
            convert::convert(value).map_err(|source| Error::OverrideConversion {
                key: key.clone(),
                value: value.clone(),
                source,
            })?;
        let path = &key[KEY_PREFIX.len()..];
        if path.is_empty() {
            return Err(Error::Path {
                path: String::new(),
                reason: "path cannot be empty".to_owned(),
            });
        }
        write(document, path, converted)?;
        log::debug!("applied override; path={path:?}");
    }
    Ok(())
}

/// Write `value` at `path`, creating intermediate containers as needed.
///
/// Sibling keys and elements at every level are left untouched. The
/// terminal segment replaces whatever value is present.
pub(crate) fn write(document: &mut Value, path: &str, value: Value) -> Result<()> {
    let segments = path::parse(path);
    write_at(document, &segments, path, value)
}

fn write_at(node: &mut Value, segments: &[Segment], path: &str, value: Value) -> Result<()> {
    let Some((segment, rest)) = segments.split_first() else {
        *node = value;
        return Ok(());
    };
    match segment {
        Segment::Field(name) => match node {
            Value::Object(entries) => write_at(
                entries.entry(name.clone()).or_insert(Value::Null),
                rest,
                path,
                value,
            ),
            Value::Array(_) => Err(Error::Path {
                path: path.to_owned(),
                reason: format!("segment {name:?} names a field but an array occupies this position"),
            }),
            other => {
                // scalars give way to a freshly created object
                *other = Value::Object(Map::new());
                write_at(other, segments, path, value)
            }
        },
        Segment::Index(index, raw) => match node {
            // objects may carry all-digit field names; address those as
            // fields, keeping the segment as written
            Value::Object(entries) => write_at(
                entries.entry(raw.clone()).or_insert(Value::Null),
                rest,
                path,
                value,
            ),
            Value::Array(items) => {
                if items.len() <= *index {
                    items.resize(*index + 1, Value::Null);
                }
                write_at(&mut items[*index], rest, path, value)
            }
            other => {
                *other = Value::Array(Vec::new());
                write_at(other, segments, path, value)
            }
        },
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    // Paths built purely from alphabetic segments only ever address
    // objects, so sequences over them can never hit a type conflict.
    fn object_path() -> impl Strategy<Value = String> {
        proptest::collection::vec("[a-e]{1,2}", 1..4).prop_map(|segments| segments.join("."))
    }

    // No sequence values here: a later field write descending into an
    // array would be a legitimate type conflict, and these strategies are
    // meant to stay conflict-free.
    fn yaml_value() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("1".to_owned()),
            Just("-2".to_owned()),
            Just("true".to_owned()),
            Just("null".to_owned()),
            Just("\"hi\"".to_owned()),
            Just("{a: 1, b: 2}".to_owned()),
        ]
    }

    fn override_pairs() -> impl Strategy<Value = Vec<(String, String)>> {
        proptest::collection::vec((object_path(), yaml_value()), 1..6).prop_map(|entries| {
            entries
                .into_iter()
                .map(|(path, value)| (format!("CONFIGSET.{path}"), value))
                .collect()
        })
    }

    proptest! {
        /// Applying the same pair sequence twice leaves the tree where one
        /// pass left it.
        #[test]
        fn prop_apply_twice_is_idempotent(pairs in override_pairs()) {
            let mut once = json!({});
            apply_overrides(&mut once, &pairs).unwrap();

            let mut twice = once.clone();
            apply_overrides(&mut twice, &pairs).unwrap();

            prop_assert_eq!(once, twice);
        }

        /// A written path immediately reads back the converted value.
        #[test]
        fn prop_write_then_read_round_trips(path in object_path(), value in yaml_value()) {
            let converted = crate::convert::convert(&value).unwrap();
            let mut doc = json!({});
            write(&mut doc, &path, converted.clone()).unwrap();

            prop_assert_eq!(crate::path::lookup(&doc, &path), Some(&converted));
        }

        /// The later of two writes to the same path wins, however many
        /// unrelated pairs sit between them.
        #[test]
        fn prop_same_path_later_wins(
            path in object_path(),
            unrelated in override_pairs(),
        ) {
            let key = format!("CONFIGSET.{path}");
            let mut pairs = vec![(key.clone(), "\"first\"".to_owned())];
            pairs.extend(
                unrelated
                    .into_iter()
                    .filter(|(k, _)| k != &key && !k.starts_with(&format!("{key}.")))
            );
            pairs.push((key, "\"second\"".to_owned()));

            let mut doc = json!({});
            apply_overrides(&mut doc, &pairs).unwrap();

            prop_assert_eq!(crate::path::lookup(&doc, &path), Some(&json!("second")));
        }
    }
}
