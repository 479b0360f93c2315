//! Snapshot selection for siterestore
//!
//! The backup root holds one directory per site; each site directory holds
//! one directory per snapshot, named with the snapshot's timestamp. This
//! module discovers sites, picks the newest snapshot per site by parsed
//! timestamp value (never by string order), and computes the backup file
//! triple the restore steps consume.
//!
//! # Layout
//!
//! ```text
//! <backup_root>/<site>/<timestamp>/<timestamp>-<slug>-database.sql.gz
//!                                  <timestamp>-<slug>-files.tar
//!                                  <timestamp>-<slug>-private-files.tar
//! ```
//!
//! where `<slug>` is the site name with every `.` replaced by `_`.
//!
//! A directory name that does not parse as a timestamp means the backup
//! tree is malformed; that is an explicit error, never skipped.

mod errors;
mod selector;

pub use errors::{SnapshotError, SnapshotResult};
pub use selector::{latest_snapshot, list_sites, site_slug, BackupSet, TIMESTAMP_FORMAT};
