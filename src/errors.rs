use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StylistError {
    #[error("configuration error: {0}")] Config(String),
    #[error("provider error: {0}")] Provider(String),
}

/// Failures of the JSON files behind [`crate::store::JsonStore`].
///
/// `Read` never escapes the store; it is folded into a warning and the
/// collection is treated as empty. `Write` is handed back to the caller.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("error reading {path}: {reason}")]
    Read { path: PathBuf, reason: String },
    #[error("error saving {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}
