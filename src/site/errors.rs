//! Site reconciliation error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::archive::ArchiveError;
use crate::db::DbError;
use crate::fetch::FetchError;
use crate::snapshot::SnapshotError;

/// Result type for site reconciliation
pub type SiteResult<T> = Result<T, SiteError>;

/// Everything that can go wrong while reconciling sites.
///
/// Component errors convert via `#[from]`; the reconciler decides whether
/// an error is site-scoped (recorded, run continues) or run-scoped
/// (propagated, process exits nonzero).
#[derive(Debug, Error)]
pub enum SiteError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to read site config for {site}: {detail}")]
    SiteConfig { site: String, detail: String },

    #[error("Failed to read common site config: {detail}")]
    CommonConfig { detail: String },

    #[error("Failed to write site files for {site}: {source}")]
    SiteIo { site: String, source: io::Error },

    #[error("Backup root {} contains no sites", .path.display())]
    NoBackups { path: PathBuf },
}
