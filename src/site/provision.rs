//! New-site identity minting

use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::{Digest, Sha1};

use crate::db::DatabaseTarget;

/// Length of generated database passwords.
pub const PASSWORD_LENGTH: usize = 16;

/// Derive the database name for a site: `_` followed by the first 16 hex
/// characters of the SHA-1 digest of the site name.
///
/// Deterministic, so re-provisioning the same site always lands on the
/// same database.
pub fn derive_db_name(site: &str) -> String {
    let digest = Sha1::digest(site.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    format!("_{}", &hex[..16])
}

/// Generate a random alphanumeric password of the given length.
pub fn random_password(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Mint the database target for a brand-new site.
pub fn mint_target(site: &str) -> DatabaseTarget {
    DatabaseTarget::new(derive_db_name(site), random_password(PASSWORD_LENGTH))
}
