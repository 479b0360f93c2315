//! CLI command implementations
//!
//! `restore` wires the collaborators together in fail-fast order: resolve
//! paths, load database credentials (mandatory before anything external is
//! touched), decide whether a remote fetch is needed, then hand over to
//! the reconciler and report the summary.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{DbConfig, Paths};
use crate::db::MysqlAdmin;
use crate::fetch::{S3Config, S3Fetcher};
use crate::observability::Logger;
use crate::site::{Reconciler, SiteRegistry};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and dispatch. This is the only entry point main calls.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    let result = match cli.command {
        Command::Restore {
            backup_root,
            sites_root,
        } => restore(backup_root, sites_root),
    };

    if let Err(e) = &result {
        Logger::fatal("run_failed", &[("error", &e.to_string())]);
    }

    result
}

/// Restore every site under the backup root.
pub fn restore(backup_root: Option<PathBuf>, sites_root: Option<PathBuf>) -> CliResult<()> {
    let paths = Paths::resolve(backup_root, sites_root)?;

    // Mandatory credential check comes first: without the administrative
    // password no restore can run, and nothing external may be touched.
    let db_config = DbConfig::from_env()?;

    let registry = SiteRegistry::new(&paths.sites_root);
    let db_host = db_config.resolve_host(registry.db_host()?);
    let admin = MysqlAdmin::new(db_host, &db_config.root_user, &db_config.root_password);

    fs::create_dir_all(&paths.backup_root).map_err(|e| CliError::BackupRoot {
        path: paths.backup_root.clone(),
        source: e,
    })?;

    // The remote store is only consulted when there is nothing local, so
    // its configuration is only required then.
    let fetcher = if backup_root_is_empty(&paths.backup_root)? {
        Some(S3Fetcher::new(S3Config::from_env()?))
    } else {
        None
    };

    let mut reconciler = Reconciler::new(&paths.backup_root, registry, &admin);
    if let Some(fetcher) = &fetcher {
        reconciler = reconciler.with_fetcher(fetcher);
    }

    let report = reconciler.run()?;
    report.log_summary();

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::SitesFailed {
            count: report.failed.len(),
        })
    }
}

fn backup_root_is_empty(backup_root: &Path) -> CliResult<bool> {
    let mut entries = fs::read_dir(backup_root).map_err(|e| CliError::BackupRoot {
        path: backup_root.to_path_buf(),
        source: e,
    })?;

    Ok(entries.next().is_none())
}
