//! Process-wide default config set.
//!
//! A thin convenience layer over one [`ConfigSet`] instance, loading from
//! the real filesystem and the real process environment. The instance
//! sits behind an `RwLock`, so reads from multiple threads are fine once
//! [`open`] has returned; re-initialization is not coordinated with
//! in-flight readers beyond that lock, so finish (re)opening before
//! spawning readers.
//!
//! The panicking variants exist for programs that treat a missing or
//! malformed configuration as fatal; they preserve the formatted error
//! message. Programs that branch on [`Error::is_value_not_found`] should
//! use the non-panicking variants, which preserve error identity.
//!
//! [`Error::is_value_not_found`]: crate::Error::is_value_not_found

use std::path::Path;
use std::sync::{PoisonError, RwLock};

use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;

use crate::environment;
use crate::error::Result;
use crate::fs::OsFileReader;
use crate::set::ConfigSet;

static DEFAULT: Lazy<RwLock<ConfigSet>> = Lazy::new(|| RwLock::new(ConfigSet::new()));

/// Load the process-wide config set.
///
/// Reads every `*.yaml` file under `dir_path` and applies `CONFIGSET.*`
/// overrides from the process environment. On failure the previously
/// opened state (if any) stays in place.
///
/// # Errors
///
/// Propagates the first load failure; see [`ConfigSet::load`].
pub fn open(dir_path: impl AsRef<Path>) -> Result<()> {
    let mut candidate = ConfigSet::new();
    candidate.load(
        &OsFileReader,
        dir_path.as_ref(),
        &environment::process_environment(),
    )?;
    *DEFAULT.write().unwrap_or_else(PoisonError::into_inner) = candidate;
    Ok(())
}

/// Like [`open`], but panics when an error occurs.
///
/// # Panics
///
/// Panics with the formatted load error.
pub fn must_open(dir_path: impl AsRef<Path>) {
    if let Err(err) = open(dir_path) {
        panic!("open config set: {err}");
    }
}

/// Decode the value at `path` from the process-wide config set.
///
/// # Errors
///
/// See [`ConfigSet::read_value`].
pub fn read_value<T: DeserializeOwned>(path: &str) -> Result<T> {
    DEFAULT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .read_value(path)
}

/// Like [`read_value`], but panics when an error occurs.
///
/// # Panics
///
/// Panics with the formatted read error.
pub fn must_read_value<T: DeserializeOwned>(path: &str) -> T {
    match read_value(path) {
        Ok(value) => value,
        Err(err) => panic!("read value: {err}"),
    }
}

/// Serialize the process-wide config set; see [`ConfigSet::dump`].
#[must_use]
pub fn dump(prefix: &str, indent: &str) -> String {
    DEFAULT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .dump(prefix, indent)
}
