//! Directory aggregation: one `*.yaml` file per top-level key.

use std::path::Path;

use serde_json::{Map, Value};

use crate::convert;
use crate::error::{Error, Result};
use crate::fs::FileReader;

/// Files must carry this suffix to participate in aggregation.
pub const FILE_SUFFIX: &str = ".yaml";

/// Aggregate every `*.yaml` file under `dir_path` into one object tree.
///
/// Each matching file becomes a top-level entry keyed by its base name
/// with the suffix stripped. Entries are processed in sorted name order,
/// so on (unlikely) key collisions the last sorted file wins. A directory
/// with no matching files yields the empty object, never an error.
///
/// # Errors
///
/// Returns [`Error::DirectoryRead`] if the listing fails (the underlying
/// not-found condition stays checkable), [`Error::FileRead`] if a matched
/// file cannot be read, and [`Error::FileConversion`] if one is not valid
/// UTF-8 or does not convert to a canonical tree.
pub fn aggregate(reader: &dyn FileReader, dir_path: &Path) -> Result<Value> {
    let pattern = dir_path.join(format!("*{FILE_SUFFIX}"));
    let mut file_paths = reader
        .list_dir(dir_path)
        .map_err(|source| Error::DirectoryRead {
            pattern: pattern.display().to_string(),
            source,
        })?;
    file_paths.sort();

    let mut document = Map::new();
    for file_path in file_paths {
        let file_name = match file_path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };
        let Some(key) = file_name.strip_suffix(FILE_SUFFIX) else {
            continue;
        };
        let contents = reader
            .read_file(&file_path)
            .map_err(|source| Error::FileRead {
                path: file_path.clone(),
                source,
            })?;
        let text = std::str::from_utf8(&contents).map_err(|source| Error::FileConversion {
            path: file_path.clone(),
            source: convert::ConvertError::InvalidEncoding { source },
        })?;
        let tree = convert::convert(text).map_err(|source| Error::FileConversion {
            path: file_path.clone(),
            source,
        })?;
        log::debug!(
            "aggregated configuration file; path={} key={key:?}",
            file_path.display()
        );
        document.insert(key.to_owned(), tree);
    }
    Ok(Value::Object(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemFileReader;
    use serde_json::json;

    #[test]
    fn test_aggregate_keys_files_by_base_name() {
        let mut files = MemFileReader::new();
        files
            .add_file("/my_etc/aaa.yaml", "hello: world\nnumbers: [1,2,3]\n")
            .add_file("/my_etc/gogo.yaml", "version: 1.0\nauthor: roy\n");

        let tree = aggregate(&files, Path::new("/my_etc")).unwrap();
        assert_eq!(
            tree,
            json!({
                "aaa": {"hello": "world", "numbers": [1, 2, 3]},
                "gogo": {"author": "roy", "version": 1},
            })
        );
    }

    #[test]
    fn test_aggregate_ignores_unrelated_files() {
        let mut files = MemFileReader::new();
        files
            .add_file("/my_etc/aaa.yaml", "hello: world\n")
            .add_file("/my_etc/test.txt", "just for fun!\n")
            .add_file("/my_etc/notes.yml", "wrong: suffix\n");

        let tree = aggregate(&files, Path::new("/my_etc")).unwrap();
        assert_eq!(tree, json!({"aaa": {"hello": "world"}}));
    }

    #[test]
    fn test_aggregate_empty_directory_yields_empty_object() {
        let mut files = MemFileReader::new();
        files.add_dir("/my_etc");
        let tree = aggregate(&files, Path::new("/my_etc")).unwrap();
        assert_eq!(tree, json!({}));
    }

    #[test]
    fn test_aggregate_missing_directory_fails() {
        let files = MemFileReader::new();
        let err = aggregate(&files, Path::new("/helloworld")).unwrap_err();
        assert!(err.is_directory_not_found());
        let display = format!("{err}");
        assert!(display.contains("helloworld"));
    }

    #[test]
    fn test_aggregate_rejects_non_utf8_file() {
        let mut files = MemFileReader::new();
        files.add_file("/my_etc/aaa.yaml", vec![0xFF, 0xFE, 0x0A]);

        let err = aggregate(&files, Path::new("/my_etc")).unwrap_err();
        match &err {
            Error::FileConversion { path, source } => {
                assert_eq!(path, Path::new("/my_etc/aaa.yaml"));
                assert!(matches!(
                    source,
                    crate::convert::ConvertError::InvalidEncoding { .. }
                ));
            }
            other => panic!("expected file conversion error, got {other}"),
        }
    }

    #[test]
    fn test_aggregate_bad_yaml_names_the_file() {
        let mut files = MemFileReader::new();
        files.add_file("/my_etc/aaa.yaml", "hello: world\nnumbers: [1,2,3\n");

        let err = aggregate(&files, Path::new("/my_etc")).unwrap_err();
        assert!(matches!(err, Error::FileConversion { .. }));
        let display = format!("{err}");
        assert!(display.contains("aaa.yaml"));
    }
}
