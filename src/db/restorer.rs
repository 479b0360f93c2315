//! The strict database restore sequence

use crate::observability::Logger;
use crate::snapshot::BackupSet;

use super::admin::DatabaseAdmin;
use super::dump::decompress_dump;
use super::errors::DbResult;
use super::target::DatabaseTarget;

/// Runs the restore sequence against a [`DatabaseAdmin`].
///
/// Order is fixed and every step is fatal-on-error for the site:
///
/// 1. decompress the `.sql.gz` dump to its sibling `.sql`
/// 2. drop the target database if it exists
/// 3. create the target database if it does not exist
/// 4. create the database user if missing, at any host
/// 5. overwrite the user's password
/// 6. grant full privileges on the database, flush
/// 7. load the decompressed dump with administrative credentials
///
/// Step 2 irreversibly destroys any pre-existing data in the target
/// database. A restore replaces state; it never merges.
pub struct DatabaseRestorer<'a> {
    admin: &'a dyn DatabaseAdmin,
}

impl<'a> DatabaseRestorer<'a> {
    pub fn new(admin: &'a dyn DatabaseAdmin) -> Self {
        DatabaseRestorer { admin }
    }

    pub fn restore(&self, site: &str, backup: &BackupSet, target: &DatabaseTarget) -> DbResult<()> {
        Logger::info("extract_database_dump", &[("site", site)]);
        decompress_dump(&backup.database_archive(), &backup.database_dump())?;

        self.admin.drop_if_exists(&target.name)?;
        self.admin.create_if_not_exists(&target.name)?;
        self.admin.ensure_user(target.user(), &target.password)?;
        self.admin.set_password(target.user(), &target.password)?;
        self.admin.grant_all(&target.name, target.user())?;

        Logger::info(
            "restore_database",
            &[("site", site), ("database", &target.name)],
        );
        self.admin.load_dump(&target.name, &backup.database_dump())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::errors::DbError;
    use crate::snapshot::BackupSet;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::Path;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Records every administrative call; optionally fails a named op.
    struct FakeAdmin {
        calls: Mutex<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl FakeAdmin {
        fn new() -> Self {
            FakeAdmin {
                calls: Mutex::new(Vec::new()),
                fail_on: None,
            }
        }

        fn failing_on(op: &'static str) -> Self {
            FakeAdmin {
                calls: Mutex::new(Vec::new()),
                fail_on: Some(op),
            }
        }

        fn record(&self, op: &'static str, detail: String) -> DbResult<()> {
            self.calls.lock().unwrap().push(format!("{op}:{detail}"));
            if self.fail_on == Some(op) {
                return Err(DbError::CommandFailed {
                    operation: op,
                    detail: "injected failure".to_string(),
                });
            }
            Ok(())
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl DatabaseAdmin for FakeAdmin {
        fn drop_if_exists(&self, db: &str) -> DbResult<()> {
            self.record("drop", db.to_string())
        }
        fn create_if_not_exists(&self, db: &str) -> DbResult<()> {
            self.record("create", db.to_string())
        }
        fn ensure_user(&self, user: &str, _password: &str) -> DbResult<()> {
            self.record("ensure_user", user.to_string())
        }
        fn set_password(&self, user: &str, _password: &str) -> DbResult<()> {
            self.record("set_password", user.to_string())
        }
        fn grant_all(&self, db: &str, user: &str) -> DbResult<()> {
            self.record("grant", format!("{db}/{user}"))
        }
        fn load_dump(&self, db: &str, dump: &Path) -> DbResult<()> {
            self.record("load", format!("{db}:{}", dump.display()))
        }
    }

    fn stage_backup(root: &Path, site: &str, stamp: &str) -> BackupSet {
        let slug = site.replace('.', "_");
        let dir = root.join(site).join(stamp);
        fs::create_dir_all(&dir).unwrap();

        let base = dir.join(format!("{stamp}-{slug}"));
        let gz = File::create(format!("{}-database.sql.gz", base.display())).unwrap();
        let mut encoder = GzEncoder::new(gz, Compression::default());
        encoder.write_all(b"CREATE TABLE t (id INT);\n").unwrap();
        encoder.finish().unwrap();
        File::create(format!("{}-files.tar", base.display())).unwrap();
        File::create(format!("{}-private-files.tar", base.display())).unwrap();

        BackupSet::locate(root, site).unwrap()
    }

    #[test]
    fn test_restore_runs_steps_in_order() {
        let temp = TempDir::new().unwrap();
        let backup = stage_backup(temp.path(), "site.test", "20230101000000");
        let target = DatabaseTarget::new("_db16", "pw");

        let admin = FakeAdmin::new();
        DatabaseRestorer::new(&admin)
            .restore("site.test", &backup, &target)
            .unwrap();

        let calls = admin.calls();
        assert_eq!(calls.len(), 6);
        assert_eq!(calls[0], "drop:_db16");
        assert_eq!(calls[1], "create:_db16");
        assert_eq!(calls[2], "ensure_user:_db16");
        assert_eq!(calls[3], "set_password:_db16");
        assert_eq!(calls[4], "grant:_db16/_db16");
        assert!(calls[5].starts_with("load:_db16:"));

        // The dump was decompressed next to the archive
        assert_eq!(
            fs::read(backup.database_dump()).unwrap(),
            b"CREATE TABLE t (id INT);\n"
        );
    }

    #[test]
    fn test_restore_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let backup = stage_backup(temp.path(), "site.test", "20230101000000");
        let target = DatabaseTarget::new("_db16", "pw");

        let admin = FakeAdmin::new();
        let restorer = DatabaseRestorer::new(&admin);
        restorer.restore("site.test", &backup, &target).unwrap();

        let first = admin.calls();
        restorer.restore("site.test", &backup, &target).unwrap();
        let second = admin.calls();

        // The second run replays exactly the same sequence
        assert_eq!(second.len(), first.len() * 2);
        assert_eq!(&second[first.len()..], first.as_slice());
    }

    #[test]
    fn test_failed_step_aborts_sequence() {
        let temp = TempDir::new().unwrap();
        let backup = stage_backup(temp.path(), "site.test", "20230101000000");
        let target = DatabaseTarget::new("_db16", "pw");

        let admin = FakeAdmin::failing_on("create");
        let err = DatabaseRestorer::new(&admin)
            .restore("site.test", &backup, &target)
            .unwrap_err();

        assert!(matches!(err, DbError::CommandFailed { .. }));
        // Nothing past the failed step ran
        assert_eq!(admin.calls(), vec!["drop:_db16", "create:_db16"]);
    }

    #[test]
    fn test_missing_dump_archive_fails_before_any_mutation() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("site.test/20230101000000")).unwrap();
        let backup = BackupSet::locate(temp.path(), "site.test").unwrap();
        let target = DatabaseTarget::new("_db16", "pw");

        let admin = FakeAdmin::new();
        let err = DatabaseRestorer::new(&admin)
            .restore("site.test", &backup, &target)
            .unwrap_err();

        assert!(matches!(err, DbError::Decompress { .. }));
        assert!(admin.calls().is_empty());
    }
}
