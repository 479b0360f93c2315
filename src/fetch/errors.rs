//! Fetch error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for remote fetch operations
pub type FetchResult<T> = Result<T, FetchError>;

/// Errors raised while pulling backups from the object store.
///
/// All of these are fatal for the run: fetching happens before any restore,
/// so no external state has been mutated yet.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Variable {0} not set")]
    MissingEnv(&'static str),

    #[error("Failed to start async runtime: {source}")]
    Runtime { source: io::Error },

    #[error("Failed to prepare local path {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Failed to list remote backups: {detail}")]
    List { detail: String },

    #[error("Failed to download {key} after {attempts} attempts: {detail}")]
    Download {
        key: String,
        attempts: u32,
        detail: String,
    },
}
