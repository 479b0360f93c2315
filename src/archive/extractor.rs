//! Tar extraction into an explicit destination

use std::fs::File;
use std::path::Path;

use tar::Archive;

use crate::observability::Logger;
use crate::snapshot::BackupSet;

use super::errors::{ArchiveError, ArchiveResult};

/// Extract one tar archive into `dest`.
pub fn extract_archive(archive_path: &Path, dest: &Path) -> ArchiveResult<()> {
    let file = File::open(archive_path).map_err(|e| ArchiveError::Open {
        path: archive_path.to_path_buf(),
        source: e,
    })?;

    Logger::info(
        "extract_archive",
        &[("archive", &archive_path.display().to_string())],
    );

    let mut archive = Archive::new(file);
    archive.unpack(dest).map_err(|e| ArchiveError::Unpack {
        path: archive_path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Extract both file archives of a snapshot into the sites root.
///
/// Private files first, then public files, so a failure in the private
/// archive is detected before any public content lands.
pub fn extract_site_archives(backup: &BackupSet, sites_root: &Path) -> ArchiveResult<()> {
    extract_archive(&backup.private_files(), sites_root)?;
    extract_archive(&backup.public_files(), sites_root)?;
    Ok(())
}
