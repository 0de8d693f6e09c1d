#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # configset
//!
//! Aggregates every `*.yaml` file under one directory into a single
//! in-memory JSON document, applies `CONFIGSET.<dotted.path>=<yaml value>`
//! overrides from environment-style `NAME=VALUE` entries, and exposes
//! whole-document dumps plus typed, path-addressed reads.
//!
//! Each file becomes a top-level key (its base name with `.yaml`
//! stripped). Override values are themselves YAML, so a literal string
//! that could read as a number, boolean or null must be quoted. Dotted
//! paths use `.` as separator; an all-digit segment indexes an array.
//!
//! ## Core Types
//!
//! - [`ConfigSet`]: owns the aggregate tree; `load`, `dump`, `read_value`
//! - [`FileReader`], [`OsFileReader`], [`MemFileReader`]: the file-tree seam
//! - [`Error`] and [`Result`]: error handling types
//! - [`global`]: process-wide default instance for zero-argument access
//!
//! ## Examples
//!
//! ```
//! use configset::{ConfigSet, MemFileReader};
//! use std::path::Path;
//!
//! let mut files = MemFileReader::new();
//! files.add_file("/etc/app/foo.yaml", "user_id: 1000\nnickname: roy\n");
//!
//! let mut set = ConfigSet::new();
//! set.load(
//!     &files,
//!     Path::new("/etc/app"),
//!     &["CONFIGSET.foo.nickname=\"lisa\"".to_owned()],
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     set.dump("", ""),
//!     r#"{"foo":{"nickname":"lisa","user_id":1000}}"#
//! );
//!
//! let nickname: String = set.read_value("foo.nickname").unwrap();
//! assert_eq!(nickname, "lisa");
//! ```
//!
//! ## Override application order
//!
//! Override pairs apply sorted by dotted path, parents before children,
//! so a nested override survives a later whole-object write higher up;
//! exact duplicate paths keep input order and the last one wins. A
//! failing pair aborts the load with earlier pairs already applied to
//! the candidate tree. The candidate is only published on overall
//! success, so readers never see a partially patched document, but the
//! fold itself is not transactional.

pub mod aggregate;
pub mod convert;
pub mod environment;
pub mod error;
pub mod fs;
pub mod global;
mod patch;
mod path;
pub mod set;

// Re-export key types at crate root for convenience
pub use environment::KEY_PREFIX;
pub use error::{Error, Result};
pub use fs::{FileReader, MemFileReader, OsFileReader};
pub use set::ConfigSet;
