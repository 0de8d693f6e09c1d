//! Dotted-path addressing into the aggregate document.
//!
//! A path is a `.`-separated list of segments. A segment consisting only
//! of ASCII digits addresses an array element; any other segment addresses
//! an object field. The empty path denotes the whole document on the read
//! side and is rejected on the write side (see the patch module).

use serde_json::Value;

/// One parsed path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// An object field name.
    Field(String),
    /// A non-negative array index. Carries the segment as written so the
    /// object-field fallback addresses zero-padded keys like `"007"`
    /// literally.
    Index(usize, String),
}

/// Split a non-empty dotted path into segments.
pub(crate) fn parse(path: &str) -> Vec<Segment> {
    path.split('.')
        .map(|raw| {
            if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
                if let Ok(index) = raw.parse::<usize>() {
                    return Segment::Index(index, raw.to_owned());
                }
            }
            Segment::Field(raw.to_owned())
        })
        .collect()
}

/// Locate the sub-tree at `path`. The empty path is the whole document.
///
/// Digit segments index arrays; on objects they fall back to addressing
/// the field named by the segment as written, since objects may
/// legitimately carry all-digit keys.
pub(crate) fn lookup<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(tree);
    }
    let mut current = tree;
    for segment in parse(path) {
        current = match (&segment, current) {
            (Segment::Field(name), Value::Object(entries)) => entries.get(name)?,
            (Segment::Index(index, _), Value::Array(items)) => items.get(*index)?,
            (Segment::Index(_, raw), Value::Object(entries)) => entries.get(raw)?,
            _ => return None,
        };
    }
    Some(current)
}
