//! Database restoration error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;

/// Errors raised while restoring a site's database.
///
/// Fatal for the affected site's restore. `CommandFailed` carries the
/// engine's stderr so the operator sees what the engine rejected.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Failed to decompress {}: {source}", .path.display())]
    Decompress { path: PathBuf, source: io::Error },

    #[error("Failed to open dump {}: {source}", .path.display())]
    DumpOpen { path: PathBuf, source: io::Error },

    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: &'static str,
        source: io::Error,
    },

    #[error("Database operation {operation} failed: {detail}")]
    CommandFailed {
        operation: &'static str,
        detail: String,
    },
}
