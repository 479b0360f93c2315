//! Snapshot selection error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for snapshot selection
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Errors raised while locating a site's backup files.
///
/// All of these are fatal for the affected site's restore; the reconciler
/// decides whether the run continues with the remaining sites.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read backup directory {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed backup for site {site}: {name} is not a valid snapshot timestamp")]
    MalformedTimestamp { site: String, name: String },

    #[error("No snapshots found for site {site}")]
    NoSnapshots { site: String },

    #[error("Missing backup artifact: {}", .path.display())]
    MissingArtifact { path: PathBuf },
}

impl SnapshotError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
