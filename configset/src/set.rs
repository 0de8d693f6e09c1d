//! The config set: load once, read many times.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::aggregate;
use crate::environment;
use crate::error::{Error, Result};
use crate::fs::FileReader;
use crate::patch;
use crate::path;

/// An aggregate configuration document with override support.
///
/// A `ConfigSet` owns exactly one tree: the merge of every `*.yaml` file
/// under a directory, patched by `CONFIGSET.*` override pairs. It starts
/// out unloaded, is populated by [`ConfigSet::load`], and afterwards
/// serves [`ConfigSet::dump`] and [`ConfigSet::read_value`] as pure
/// projections over the stored tree.
///
/// The core performs no internal locking. At most one `load` should be in
/// flight per instance, with no reads overlapping it; once a load has
/// completed, concurrent reads need no synchronization. A reload builds
/// the replacement tree fully aside and publishes it with a single
/// assignment, only on success.
///
/// # Examples
///
/// ```
/// use configset::{ConfigSet, MemFileReader};
/// use std::path::Path;
///
/// let mut files = MemFileReader::new();
/// files.add_file("/etc/app/server.yaml", "host: localhost\nport: 8080\n");
///
/// let mut set = ConfigSet::new();
/// set.load(
///     &files,
///     Path::new("/etc/app"),
///     &["CONFIGSET.server.port=9090".to_owned()],
/// )
/// .unwrap();
///
/// let port: u16 = set.read_value("server.port").unwrap();
/// assert_eq!(port, 9090);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ConfigSet {
    document: Value,
}

impl ConfigSet {
    /// Create an unloaded config set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True once a load has succeeded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        !self.document.is_null()
    }

    /// Aggregate `*.yaml` files under `dir_path`, apply `CONFIGSET.*`
    /// overrides from `environment`, and store the resulting tree.
    ///
    /// The new tree is built fully aside and published with one assignment
    /// only on success; any failure leaves previously loaded state (or the
    /// unloaded state) untouched. Override pairs apply sorted by path,
    /// parents before children; see the crate docs for the non-atomicity
    /// note.
    ///
    /// # Errors
    ///
    /// Propagates the first failure from aggregation
    /// ([`Error::DirectoryRead`], [`Error::FileRead`],
    /// [`Error::FileConversion`]) or patching
    /// ([`Error::OverrideConversion`], [`Error::Path`]).
    pub fn load(
        &mut self,
        reader: &dyn FileReader,
        dir_path: &Path,
        environment: &[String],
    ) -> Result<()> {
        let mut document = aggregate::aggregate(reader, dir_path)?;
        let pairs = environment::extract_overrides(environment);
        patch::apply_overrides(&mut document, &pairs)?;
        self.document = document;
        log::debug!("loaded config set; dirPath={}", dir_path.display());
        Ok(())
    }

    /// Serialize the stored tree as JSON.
    ///
    /// With both `prefix` and `indent` empty the encoding is compact, with
    /// no trailing newline. Otherwise the tree is pretty-printed with
    /// `indent` per nesting level and `prefix` prepended to every line
    /// after the first, terminated by exactly one newline.
    ///
    /// Calling this before a successful [`ConfigSet::load`] serializes the
    /// unloaded document (`null`); treat a prior load as a precondition.
    #[must_use]
    pub fn dump(&self, prefix: &str, indent: &str) -> String {
        if prefix.is_empty() && indent.is_empty() {
            return self.document.to_string();
        }
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        if self.document.serialize(&mut serializer).is_err() {
            // Value-to-buffer serialization cannot fail in practice.
            return self.document.to_string();
        }
        let text = String::from_utf8_lossy(&buf).into_owned();
        let mut out = if prefix.is_empty() {
            text
        } else {
            text.replace('\n', &format!("\n{prefix}"))
        };
        out.push('\n');
        out
    }

    /// Decode the sub-tree at `path` into `T`.
    ///
    /// The empty path denotes the whole document. Field naming follows the
    /// target's serde attributes (`#[serde(rename = …)]` and friends), so
    /// a sub-tree decodes the same regardless of its depth in the
    /// document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueNotFound`] if nothing exists at `path` (the
    /// one error worth branching on, via [`Error::is_value_not_found`])
    /// and [`Error::Decode`] if the sub-tree's shape is incompatible with
    /// `T`.
    pub fn read_value<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let Some(value) = path::lookup(&self.document, path) else {
            return Err(Error::ValueNotFound {
                path: path.to_owned(),
            });
        };
        serde_json::from_value(value.clone()).map_err(|source| Error::Decode {
            path: path.to_owned(),
            target_type: std::any::type_name::<T>(),
            source,
        })
    }
}
