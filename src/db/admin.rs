//! Administrative access to the database engine

use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};

use super::errors::{DbError, DbResult};

/// The narrow administrative interface the restore sequence needs.
///
/// One implementation shells out to the `mysql` client; tests substitute a
/// recording fake, so the destructive sequence can be verified without an
/// engine.
pub trait DatabaseAdmin {
    /// `DROP DATABASE IF EXISTS`. Destroys any existing data.
    fn drop_if_exists(&self, db: &str) -> DbResult<()>;

    /// `CREATE DATABASE IF NOT EXISTS`.
    fn create_if_not_exists(&self, db: &str) -> DbResult<()>;

    /// Create the user at any host if missing, with the given password.
    fn ensure_user(&self, user: &str, password: &str) -> DbResult<()>;

    /// Overwrite the user's credential. Covers a pre-existing user whose
    /// password drifted from the site config.
    fn set_password(&self, user: &str, password: &str) -> DbResult<()>;

    /// Grant the user full privileges on the database and flush.
    fn grant_all(&self, db: &str, user: &str) -> DbResult<()>;

    /// Bulk-load a raw SQL script into the named database.
    fn load_dump(&self, db: &str, dump: &Path) -> DbResult<()>;
}

/// Shell-out implementation over the `mysql` command-line client.
///
/// Every invocation is checked: a non-zero exit aborts the operation with
/// the engine's stderr attached.
#[derive(Debug, Clone)]
pub struct MysqlAdmin {
    host: String,
    root_user: String,
    root_password: String,
}

impl MysqlAdmin {
    pub fn new(
        host: impl Into<String>,
        root_user: impl Into<String>,
        root_password: impl Into<String>,
    ) -> Self {
        MysqlAdmin {
            host: host.into(),
            root_user: root_user.into(),
            root_password: root_password.into(),
        }
    }

    fn base_command(&self) -> Command {
        let mut command = Command::new("mysql");
        command
            .arg(format!("-u{}", self.root_user))
            .arg(format!("-h{}", self.host))
            .arg(format!("-p{}", self.root_password));
        command
    }

    fn run_statement(&self, operation: &'static str, statement: &str) -> DbResult<()> {
        let output = self
            .base_command()
            .arg("-e")
            .arg(statement)
            .output()
            .map_err(|e| DbError::Spawn {
                tool: "mysql",
                source: e,
            })?;

        if !output.status.success() {
            return Err(DbError::CommandFailed {
                operation,
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

impl DatabaseAdmin for MysqlAdmin {
    fn drop_if_exists(&self, db: &str) -> DbResult<()> {
        self.run_statement(
            "drop_database",
            &format!("DROP DATABASE IF EXISTS `{}`;", db),
        )
    }

    fn create_if_not_exists(&self, db: &str) -> DbResult<()> {
        self.run_statement(
            "create_database",
            &format!("CREATE DATABASE IF NOT EXISTS `{}`;", db),
        )
    }

    fn ensure_user(&self, user: &str, password: &str) -> DbResult<()> {
        self.run_statement(
            "create_user",
            &format!(
                "CREATE USER IF NOT EXISTS '{}'@'%' IDENTIFIED BY '{}'; FLUSH PRIVILEGES;",
                user, password
            ),
        )
    }

    fn set_password(&self, user: &str, password: &str) -> DbResult<()> {
        self.run_statement(
            "set_user_password",
            &format!(
                "UPDATE mysql.user SET authentication_string = PASSWORD('{}') \
                 WHERE User = '{}' AND Host = '%';",
                password, user
            ),
        )
    }

    fn grant_all(&self, db: &str, user: &str) -> DbResult<()> {
        self.run_statement(
            "grant_privileges",
            &format!(
                "GRANT ALL PRIVILEGES ON `{}`.* TO '{}'@'%'; FLUSH PRIVILEGES;",
                db, user
            ),
        )
    }

    fn load_dump(&self, db: &str, dump: &Path) -> DbResult<()> {
        let file = File::open(dump).map_err(|e| DbError::DumpOpen {
            path: dump.to_path_buf(),
            source: e,
        })?;

        let output = self
            .base_command()
            .arg(db)
            .stdin(Stdio::from(file))
            .output()
            .map_err(|e| DbError::Spawn {
                tool: "mysql",
                source: e,
            })?;

        if !output.status.success() {
            return Err(DbError::CommandFailed {
                operation: "load_dump",
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_dump_requires_readable_file() {
        let admin = MysqlAdmin::new("localhost", "root", "secret");
        let err = admin
            .load_dump("some_db", Path::new("/nonexistent/dump.sql"))
            .unwrap_err();

        assert!(matches!(err, DbError::DumpOpen { .. }));
    }
}
