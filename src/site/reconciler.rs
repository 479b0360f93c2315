//! The top-level restore driver

use std::path::PathBuf;

use crate::archive;
use crate::db::{DatabaseAdmin, DatabaseRestorer, DatabaseTarget};
use crate::fetch::BackupFetcher;
use crate::observability::Logger;
use crate::snapshot::{self, BackupSet};

use super::context::SiteContext;
use super::errors::{SiteError, SiteResult};
use super::provision;
use super::registry::SiteRegistry;
use super::report::{RunReport, SiteFailure};

/// Drives one restore run over every site under the backup root.
///
/// Sites are processed strictly sequentially, in directory-listing order
/// (no cross-site ordering is promised). Each site is isolated: a failure
/// is logged, recorded in the report, and the run moves on.
pub struct Reconciler<'a> {
    backup_root: PathBuf,
    registry: SiteRegistry,
    admin: &'a dyn DatabaseAdmin,
    fetcher: Option<&'a dyn BackupFetcher>,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        backup_root: impl Into<PathBuf>,
        registry: SiteRegistry,
        admin: &'a dyn DatabaseAdmin,
    ) -> Self {
        Reconciler {
            backup_root: backup_root.into(),
            registry,
            admin,
            fetcher: None,
        }
    }

    /// Attach a remote fetcher, used only when the backup root is empty.
    pub fn with_fetcher(mut self, fetcher: &'a dyn BackupFetcher) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Restore every discovered site. Returns the per-site summary.
    ///
    /// An empty backup root triggers the fetcher exactly once, up front;
    /// if the root is still empty afterwards the run fails rather than
    /// quietly reporting "nothing to restore".
    pub fn run(&self) -> SiteResult<RunReport> {
        let mut sites = snapshot::list_sites(&self.backup_root)?;

        if sites.is_empty() {
            if let Some(fetcher) = self.fetcher {
                Logger::info(
                    "fetch_backups",
                    &[("dest", &self.backup_root.display().to_string())],
                );
                let objects = fetcher.fetch_all(&self.backup_root)?;
                Logger::info("fetch_complete", &[("objects", &objects.to_string())]);

                sites = snapshot::list_sites(&self.backup_root)?;
            }

            if sites.is_empty() {
                return Err(SiteError::NoBackups {
                    path: self.backup_root.clone(),
                });
            }
        }

        let mut report = RunReport::default();
        for site in sites {
            match self.restore_site(&site) {
                Ok(()) => {
                    Logger::info("site_restored", &[("site", &site)]);
                    report.restored.push(site);
                }
                Err(e) => {
                    Logger::error("site_failed", &[("site", &site), ("error", &e.to_string())]);
                    report.failed.push(SiteFailure {
                        site,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }

    /// The per-site state machine: locate and verify the snapshot, resolve
    /// or mint the database target, then restore database and archives.
    fn restore_site(&self, site: &str) -> SiteResult<()> {
        let backup = BackupSet::locate(&self.backup_root, site)?;
        backup.verify()?;

        let target = if self.registry.is_known(site) {
            self.registry.site_config(site)?.into_target()
        } else {
            self.provision_site(site)?
        };

        DatabaseRestorer::new(self.admin).restore(site, &backup, &target)?;
        archive::extract_site_archives(&backup, self.registry.sites_root())?;

        Ok(())
    }

    fn provision_site(&self, site: &str) -> SiteResult<DatabaseTarget> {
        let context = SiteContext::new(site, self.registry.sites_root());
        let target = provision::mint_target(site);

        Logger::info(
            "provision_site",
            &[("site", site), ("database", &target.name)],
        );

        self.registry.write_site_config(&context, &target)?;
        self.registry.create_site_dirs(&context)?;

        Ok(target)
    }
}
