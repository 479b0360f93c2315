//! Site reconciliation for siterestore
//!
//! The reconciler is the top-level driver. For every site discovered under
//! the backup root it decides between two paths:
//!
//! - **existing site**: the platform already knows the site; its database
//!   name and password come from the site's own configuration file.
//! - **new site**: the site must be provisioned first. A deterministic
//!   database name is minted from the site name, a random password is
//!   generated, the site configuration file is written and the standard
//!   site directories are created.
//!
//! Either way the database restore runs before the file archives are
//! extracted. Each site is isolated: one failed site is recorded in the
//! run report and the driver moves on to the next.

mod context;
mod errors;
mod provision;
mod reconciler;
mod registry;
mod report;

pub use context::SiteContext;
pub use errors::{SiteError, SiteResult};
pub use provision::{derive_db_name, mint_target, random_password, PASSWORD_LENGTH};
pub use reconciler::Reconciler;
pub use registry::{CommonConfig, SiteConfig, SiteRegistry};
pub use report::{RunReport, SiteFailure};
