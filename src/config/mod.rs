//! Process configuration
//!
//! Everything the tool needs from its environment is resolved here, up
//! front, before any external state is touched. Missing mandatory values
//! are fatal: the run stops before a single byte is fetched or mutated.

mod errors;

pub use errors::{ConfigError, ConfigResult};

use std::env;
use std::path::PathBuf;

/// Filesystem roots for a restore run.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Where backup snapshots live, one subdirectory per site.
    pub backup_root: PathBuf,
    /// The platform's sites directory (site configs, extracted files).
    pub sites_root: PathBuf,
}

impl Paths {
    /// Resolve the backup and sites roots.
    ///
    /// CLI overrides win; otherwise both default to the conventional
    /// locations under the invoking user's home directory.
    pub fn resolve(
        backup_root: Option<PathBuf>,
        sites_root: Option<PathBuf>,
    ) -> ConfigResult<Self> {
        let home = || -> ConfigResult<PathBuf> {
            env::var_os("HOME")
                .map(PathBuf::from)
                .ok_or(ConfigError::MissingHome)
        };

        let backup_root = match backup_root {
            Some(p) => p,
            None => home()?.join("backups"),
        };
        let sites_root = match sites_root {
            Some(p) => p,
            None => home()?.join("sites"),
        };

        Ok(Paths {
            backup_root,
            sites_root,
        })
    }
}

/// Administrative database connection parameters.
///
/// The root password is mandatory: without it no restore can run, so its
/// absence aborts the process before any database is dropped or created.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Database host from `DB_HOST`, if set. When unset the host falls back
    /// to the platform's common site config, then to `localhost`.
    pub host: Option<String>,
    /// Administrative user, `DB_ROOT_USER`, default `root`.
    pub root_user: String,
    /// Administrative password, `MYSQL_ROOT_PASSWORD`, mandatory.
    pub root_password: String,
}

impl DbConfig {
    pub fn from_env() -> ConfigResult<Self> {
        let root_password = env::var("MYSQL_ROOT_PASSWORD")
            .map_err(|_| ConfigError::MissingEnv("MYSQL_ROOT_PASSWORD"))?;

        let root_user = env::var("DB_ROOT_USER").unwrap_or_else(|_| "root".to_string());
        let host = env::var("DB_HOST").ok();

        Ok(DbConfig {
            host,
            root_user,
            root_password,
        })
    }

    /// Pick the effective host: explicit env value, then the platform
    /// fallback (common site config), then `localhost`.
    pub fn resolve_host(&self, fallback: Option<String>) -> String {
        self.host
            .clone()
            .or(fallback)
            .unwrap_or_else(|| "localhost".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_overrides_win() {
        let paths = Paths::resolve(
            Some(PathBuf::from("/tmp/backups")),
            Some(PathBuf::from("/tmp/sites")),
        )
        .unwrap();

        assert_eq!(paths.backup_root, PathBuf::from("/tmp/backups"));
        assert_eq!(paths.sites_root, PathBuf::from("/tmp/sites"));
    }

    #[test]
    fn test_resolve_host_precedence() {
        let with_env = DbConfig {
            host: Some("db.internal".to_string()),
            root_user: "root".to_string(),
            root_password: "secret".to_string(),
        };
        assert_eq!(
            with_env.resolve_host(Some("common-host".to_string())),
            "db.internal"
        );

        let without_env = DbConfig {
            host: None,
            root_user: "root".to_string(),
            root_password: "secret".to_string(),
        };
        assert_eq!(
            without_env.resolve_host(Some("common-host".to_string())),
            "common-host"
        );
        assert_eq!(without_env.resolve_host(None), "localhost");
    }
}
