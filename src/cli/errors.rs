//! CLI-specific error types
//!
//! Anything that reaches this level ends the process with a nonzero exit.

use thiserror::Error;

use crate::config::ConfigError;
use crate::fetch::FetchError;
use crate::site::SiteError;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// Top-level errors for a restore run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Site(#[from] SiteError),

    #[error("Failed to prepare backup root {}: {source}", .path.display())]
    BackupRoot {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("{count} site(s) failed to restore")]
    SitesFailed { count: usize },
}
