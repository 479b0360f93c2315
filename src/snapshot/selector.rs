//! Site discovery and latest-snapshot selection

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use super::errors::{SnapshotError, SnapshotResult};

/// Snapshot directory names are timestamps in this fixed format.
///
/// Example: `20230101000000`
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// List the site directories under the backup root (non-recursive,
/// directories only). Order follows the directory listing; callers must
/// not rely on it.
pub fn list_sites(backup_root: &Path) -> SnapshotResult<Vec<String>> {
    list_directories(backup_root)
}

/// Derive the site slug used in backup file names: every `.` becomes `_`.
///
/// Pure and idempotent on inputs without dots.
pub fn site_slug(site: &str) -> String {
    site.replace('.', "_")
}

/// Pick the newest snapshot for a site by parsed timestamp value.
///
/// Every directory name under the site must parse with
/// [`TIMESTAMP_FORMAT`]; one that does not means the backup tree is
/// malformed and the site cannot be restored safely.
pub fn latest_snapshot(backup_root: &Path, site: &str) -> SnapshotResult<NaiveDateTime> {
    let site_dir = backup_root.join(site);
    let mut latest: Option<NaiveDateTime> = None;

    for name in list_directories(&site_dir)? {
        let parsed = NaiveDateTime::parse_from_str(&name, TIMESTAMP_FORMAT).map_err(|_| {
            SnapshotError::MalformedTimestamp {
                site: site.to_string(),
                name,
            }
        })?;

        latest = Some(match latest {
            Some(current) if current >= parsed => current,
            _ => parsed,
        });
    }

    latest.ok_or_else(|| SnapshotError::NoSnapshots {
        site: site.to_string(),
    })
}

/// The backup file triple for one site snapshot.
///
/// Holds the base path `<backup_root>/<site>/<ts>/<ts>-<slug>`; the three
/// artifacts are derived by suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupSet {
    base: PathBuf,
}

impl BackupSet {
    /// Locate the latest snapshot for a site and build its file triple.
    ///
    /// Selection does not check that the artifacts exist; call
    /// [`BackupSet::verify`] before committing to destructive steps.
    pub fn locate(backup_root: &Path, site: &str) -> SnapshotResult<Self> {
        let timestamp = latest_snapshot(backup_root, site)?;
        let stamp = timestamp.format(TIMESTAMP_FORMAT).to_string();

        let base = backup_root
            .join(site)
            .join(&stamp)
            .join(format!("{}-{}", stamp, site_slug(site)));

        Ok(BackupSet { base })
    }

    /// The shared base path of the triple (no suffix).
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// `<base>-database.sql.gz`
    pub fn database_archive(&self) -> PathBuf {
        self.suffixed("-database.sql.gz")
    }

    /// `<base>-database.sql`, the decompressed dump written next to the
    /// archive.
    pub fn database_dump(&self) -> PathBuf {
        self.suffixed("-database.sql")
    }

    /// `<base>-files.tar`, the public files archive.
    pub fn public_files(&self) -> PathBuf {
        self.suffixed("-files.tar")
    }

    /// `<base>-private-files.tar`, the private files archive.
    pub fn private_files(&self) -> PathBuf {
        self.suffixed("-private-files.tar")
    }

    /// A snapshot is restorable only if all three artifacts exist.
    pub fn verify(&self) -> SnapshotResult<()> {
        for path in [
            self.database_archive(),
            self.public_files(),
            self.private_files(),
        ] {
            if !path.is_file() {
                return Err(SnapshotError::MissingArtifact { path });
            }
        }
        Ok(())
    }

    fn suffixed(&self, suffix: &str) -> PathBuf {
        let mut s: OsString = self.base.clone().into_os_string();
        s.push(suffix);
        PathBuf::from(s)
    }
}

fn list_directories(path: &Path) -> SnapshotResult<Vec<String>> {
    let entries = fs::read_dir(path).map_err(|e| SnapshotError::io(path, e))?;

    let mut directories = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SnapshotError::io(path, e))?;
        let file_type = entry.file_type().map_err(|e| SnapshotError::io(path, e))?;
        if file_type.is_dir() {
            directories.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    Ok(directories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn mkdirs(root: &Path, paths: &[&str]) {
        for p in paths {
            fs::create_dir_all(root.join(p)).unwrap();
        }
    }

    #[test]
    fn test_list_sites_directories_only() {
        let temp = TempDir::new().unwrap();
        mkdirs(temp.path(), &["one.example.com", "two.example.com"]);
        File::create(temp.path().join("stray-file")).unwrap();

        let mut sites = list_sites(temp.path()).unwrap();
        sites.sort();

        assert_eq!(sites, vec!["one.example.com", "two.example.com"]);
    }

    #[test]
    fn test_site_slug() {
        assert_eq!(site_slug("a.b.c"), "a_b_c");
        assert_eq!(site_slug("nodots"), "nodots");
        // Idempotent on already-slugged input
        assert_eq!(site_slug(&site_slug("a.b.c")), "a_b_c");
    }

    #[test]
    fn test_latest_snapshot_by_value() {
        let temp = TempDir::new().unwrap();
        mkdirs(
            temp.path(),
            &[
                "site/20221231235959",
                "site/20230101000000",
                "site/20220615120000",
            ],
        );

        let latest = latest_snapshot(temp.path(), "site").unwrap();
        assert_eq!(latest.format(TIMESTAMP_FORMAT).to_string(), "20230101000000");
    }

    #[test]
    fn test_latest_snapshot_single() {
        let temp = TempDir::new().unwrap();
        mkdirs(temp.path(), &["site/20230101000000"]);

        let latest = latest_snapshot(temp.path(), "site").unwrap();
        assert_eq!(latest.format(TIMESTAMP_FORMAT).to_string(), "20230101000000");
    }

    #[test]
    fn test_malformed_timestamp_is_an_error() {
        let temp = TempDir::new().unwrap();
        mkdirs(temp.path(), &["site/20230101000000", "site/not-a-timestamp"]);

        let err = latest_snapshot(temp.path(), "site").unwrap_err();
        match err {
            SnapshotError::MalformedTimestamp { site, name } => {
                assert_eq!(site, "site");
                assert_eq!(name, "not-a-timestamp");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_snapshots_is_an_error() {
        let temp = TempDir::new().unwrap();
        mkdirs(temp.path(), &["site"]);

        let err = latest_snapshot(temp.path(), "site").unwrap_err();
        assert!(matches!(err, SnapshotError::NoSnapshots { .. }));
    }

    #[test]
    fn test_locate_builds_expected_base_path() {
        let temp = TempDir::new().unwrap();
        mkdirs(temp.path(), &["foo.example.com/20230101000000"]);

        let set = BackupSet::locate(temp.path(), "foo.example.com").unwrap();

        let expected = temp
            .path()
            .join("foo.example.com")
            .join("20230101000000")
            .join("20230101000000-foo_example_com");
        assert_eq!(set.base(), expected.as_path());
        assert_eq!(
            set.database_archive(),
            temp.path()
                .join("foo.example.com")
                .join("20230101000000")
                .join("20230101000000-foo_example_com-database.sql.gz")
        );
    }

    #[test]
    fn test_verify_requires_all_three_artifacts() {
        let temp = TempDir::new().unwrap();
        mkdirs(temp.path(), &["site/20230101000000"]);

        let set = BackupSet::locate(temp.path(), "site").unwrap();
        assert!(matches!(
            set.verify(),
            Err(SnapshotError::MissingArtifact { .. })
        ));

        File::create(set.database_archive()).unwrap();
        File::create(set.public_files()).unwrap();
        assert!(matches!(
            set.verify(),
            Err(SnapshotError::MissingArtifact { .. })
        ));

        File::create(set.private_files()).unwrap();
        assert!(set.verify().is_ok());
    }
}
