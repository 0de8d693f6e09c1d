//! Error types for the configset library.
//!
//! One crate-level [`Error`] enum covers every stage of the load/read
//! pipeline, using `thiserror` for ergonomic error handling. The converter
//! keeps its own local error type ([`crate::convert::ConvertError`]) which
//! the file-loading and override-patching stages wrap distinctly, so a bad
//! YAML document is always attributable to either a file path or an
//! environment key/value pair.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::convert::ConvertError;

/// Result type alias for operations that may fail with a configset error.
///
/// # Examples
///
/// ```
/// use configset::{Error, Result};
///
/// fn example_operation() -> Result<u16> {
///     Ok(8080)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the configset library.
///
/// Every stage fails fast: the first error aborts the load and surfaces
/// here. No error is retried internally and no partial successes are
/// reported.
#[derive(Debug, Error)]
pub enum Error {
    /// Listing the configuration directory failed.
    #[error("list configuration files; pattern={pattern:?}: {source}")]
    DirectoryRead {
        /// The glob-style pattern the listing was asked for.
        pattern: String,
        /// The underlying I/O error; `ErrorKind::NotFound` stays checkable
        /// through [`Error::is_directory_not_found`].
        #[source]
        source: io::Error,
    },

    /// Reading a configuration file failed.
    #[error("read file; path={}: {source}", path.display())]
    FileRead {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A configuration file does not convert to a canonical tree.
    #[error("convert file; path={}: {source}", path.display())]
    FileConversion {
        /// The offending file.
        path: PathBuf,
        /// The converter diagnostic, preserved verbatim.
        #[source]
        source: ConvertError,
    },

    /// An override value does not convert to a canonical tree.
    #[error("convert override value; key={key:?} value={value:?}: {source}")]
    OverrideConversion {
        /// The full environment key, prefix included.
        key: String,
        /// The raw override text.
        value: String,
        /// The converter diagnostic, preserved verbatim.
        #[source]
        source: ConvertError,
    },

    /// An override path is empty or structurally conflicts with the tree.
    #[error("set value; path={path:?}: {reason}")]
    Path {
        /// The offending dotted path (prefix stripped).
        path: String,
        /// Why the path cannot be written.
        reason: String,
    },

    /// No value exists at the requested path.
    ///
    /// This is the one error callers are expected to branch on
    /// programmatically; check it with [`Error::is_value_not_found`].
    #[error("value not found; path={path:?}")]
    ValueNotFound {
        /// The path that addressed nothing.
        path: String,
    },

    /// The sub-tree at a path does not decode into the requested type.
    #[error("decode value; path={path:?} targetType={target_type:?}: {source}")]
    Decode {
        /// The path that was read.
        path: String,
        /// The name of the requested target type.
        target_type: &'static str,
        /// The underlying type-mismatch diagnostic.
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Check if the error is the value-not-found sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use configset::Error;
    ///
    /// let err = Error::ValueNotFound { path: "a.b".to_string() };
    /// assert!(err.is_value_not_found());
    /// ```
    #[must_use]
    pub fn is_value_not_found(&self) -> bool {
        matches!(self, Self::ValueNotFound { .. })
    }

    /// Check if the error is a directory listing failure caused by the
    /// configuration directory not existing.
    ///
    /// Lets callers distinguish a missing config directory from other I/O
    /// failures such as permission errors.
    #[must_use]
    pub fn is_directory_not_found(&self) -> bool {
        matches!(
            self,
            Self::DirectoryRead { source, .. } if source.kind() == io::ErrorKind::NotFound
        )
    }
}
