//! Filesystem-backed site registry
//!
//! The host platform's conventions, encoded: a site is a directory under
//! the sites root, it is *known* when it carries a `site_config.json`, and
//! the shared `common_site_config.json` holds settings common to every
//! site, such as the database host.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::db::DatabaseTarget;

use super::context::SiteContext;
use super::errors::{SiteError, SiteResult};

const SITE_CONFIG_FILE: &str = "site_config.json";
const COMMON_CONFIG_FILE: &str = "common_site_config.json";

/// The standard working directories every site carries.
const SITE_DIRS: [&str; 4] = ["public/files", "private/files", "private/backups", "locks"];

/// A site's own configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub db_name: String,
    pub db_password: String,
}

impl SiteConfig {
    pub fn into_target(self) -> DatabaseTarget {
        DatabaseTarget::new(self.db_name, self.db_password)
    }
}

/// The shared configuration file. Only the fields this tool consumes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommonConfig {
    #[serde(default)]
    pub db_host: Option<String>,
}

/// Registry over the sites root.
pub struct SiteRegistry {
    sites_root: PathBuf,
}

impl SiteRegistry {
    pub fn new(sites_root: impl Into<PathBuf>) -> Self {
        SiteRegistry {
            sites_root: sites_root.into(),
        }
    }

    pub fn sites_root(&self) -> &Path {
        &self.sites_root
    }

    /// A site is known iff its configuration file exists.
    pub fn is_known(&self, site: &str) -> bool {
        self.site_config_path(site).is_file()
    }

    /// Read an existing site's database name and password.
    pub fn site_config(&self, site: &str) -> SiteResult<SiteConfig> {
        let path = self.site_config_path(site);
        let content = fs::read_to_string(&path).map_err(|e| SiteError::SiteConfig {
            site: site.to_string(),
            detail: format!("{}: {}", path.display(), e),
        })?;

        serde_json::from_str(&content).map_err(|e| SiteError::SiteConfig {
            site: site.to_string(),
            detail: format!("{}: {}", path.display(), e),
        })
    }

    /// Write a freshly provisioned site's configuration file.
    pub fn write_site_config(
        &self,
        context: &SiteContext,
        target: &DatabaseTarget,
    ) -> SiteResult<()> {
        fs::create_dir_all(context.site_path()).map_err(|e| SiteError::SiteIo {
            site: context.site().to_string(),
            source: e,
        })?;

        let config = SiteConfig {
            db_name: target.name.clone(),
            db_password: target.password.clone(),
        };
        let content = serde_json::to_string_pretty(&config).map_err(|e| SiteError::SiteConfig {
            site: context.site().to_string(),
            detail: e.to_string(),
        })?;

        let path = context.site_path().join(SITE_CONFIG_FILE);
        fs::write(&path, content).map_err(|e| SiteError::SiteIo {
            site: context.site().to_string(),
            source: e,
        })
    }

    /// Materialize the standard site directories.
    pub fn create_site_dirs(&self, context: &SiteContext) -> SiteResult<()> {
        for dir in SITE_DIRS {
            fs::create_dir_all(context.site_path().join(dir)).map_err(|e| SiteError::SiteIo {
                site: context.site().to_string(),
                source: e,
            })?;
        }
        Ok(())
    }

    /// Database host from the common site config, when the file exists.
    pub fn db_host(&self) -> SiteResult<Option<String>> {
        let path = self.sites_root.join(COMMON_CONFIG_FILE);
        if !path.is_file() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|e| SiteError::CommonConfig {
            detail: format!("{}: {}", path.display(), e),
        })?;
        let config: CommonConfig =
            serde_json::from_str(&content).map_err(|e| SiteError::CommonConfig {
                detail: format!("{}: {}", path.display(), e),
            })?;

        Ok(config.db_host)
    }

    fn site_config_path(&self, site: &str) -> PathBuf {
        self.sites_root.join(site).join(SITE_CONFIG_FILE)
    }
}
