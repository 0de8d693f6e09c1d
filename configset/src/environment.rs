//! Environment override extraction.
//!
//! Overrides arrive as `NAME=VALUE` strings, whatever their origin: the
//! real process environment or an injected list. Only entries whose name
//! starts with [`KEY_PREFIX`] participate; everything else, including
//! malformed entries without `=`, is silently discarded. Extraction never
//! validates path shape; an entry that is exactly the prefix survives
//! here and fails in the patch stage with an empty-path error.

/// Namespace prefix distinguishing override entries from unrelated ones.
pub const KEY_PREFIX: &str = "CONFIGSET.";

/// Scan `environment` for override pairs, preserving input order.
///
/// Returns `(key, value)` pairs where `key` is the full matched name,
/// prefix included. The patch stage orders application by path but keeps
/// input order for exact duplicates, so the last entry on a path wins.
pub(crate) fn extract_overrides(environment: &[String]) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for entry in environment {
        if !entry.starts_with(KEY_PREFIX) {
            continue;
        }
        let Some((key, value)) = entry.split_once('=') else {
            continue;
        };
        pairs.push((key.to_owned(), value.to_owned()));
    }
    pairs
}

/// Capture the process environment as `NAME=VALUE` strings.
///
/// Order is stable within one invocation; no cross-process ordering is
/// assumed.
#[must_use]
pub fn process_environment() -> Vec<String> {
    std::env::vars()
        .map(|(name, value)| format!("{name}={value}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(entries: &[&str]) -> Vec<String> {
        entries.iter().map(|e| (*e).to_owned()).collect()
    }

    #[test]
    fn test_extract_keeps_only_prefixed_entries() {
        let pairs = extract_overrides(&env(&[
            "FOO=BAR",
            "CONFIGSET.aaa.hello=\"hi\"",
            "HELLO=WORLD",
        ]));
        assert_eq!(
            pairs,
            vec![("CONFIGSET.aaa.hello".to_owned(), "\"hi\"".to_owned())]
        );
    }

    #[test]
    fn test_extract_discards_entries_without_separator() {
        let pairs = extract_overrides(&env(&["CONFIGSET.gogo", "CONFIGSET"]));
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_extract_preserves_input_order() {
        let pairs = extract_overrides(&env(&[
            "CONFIGSET.a=1",
            "CONFIGSET.b=2",
            "CONFIGSET.a=3",
        ]));
        assert_eq!(
            pairs,
            vec![
                ("CONFIGSET.a".to_owned(), "1".to_owned()),
                ("CONFIGSET.b".to_owned(), "2".to_owned()),
                ("CONFIGSET.a".to_owned(), "3".to_owned()),
            ]
        );
    }

    #[test]
    fn test_extract_keeps_bare_prefix_entry() {
        // path validation belongs to the patch stage, not here
        let pairs = extract_overrides(&env(&["CONFIGSET.=1"]));
        assert_eq!(pairs, vec![("CONFIGSET.".to_owned(), "1".to_owned())]);
    }

    #[test]
    fn test_extract_splits_on_first_separator() {
        let pairs = extract_overrides(&env(&["CONFIGSET.a=\"x=y\""]));
        assert_eq!(
            pairs,
            vec![("CONFIGSET.a".to_owned(), "\"x=y\"".to_owned())]
        );
    }
}
