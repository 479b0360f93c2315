//! Archive restoration error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for archive operations
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Errors raised while extracting a site's file archives.
///
/// Fatal for the affected site's restore; other sites are unaffected.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Failed to open archive {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to extract archive {}: {source}", .path.display())]
    Unpack {
        path: PathBuf,
        source: std::io::Error,
    },
}
