//! The database a restore writes into

/// Database name and credential for one site.
///
/// The database user always equals the database name; that is the
/// platform's convention and both existing site configs and freshly minted
/// targets follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseTarget {
    pub name: String,
    pub password: String,
}

impl DatabaseTarget {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        DatabaseTarget {
            name: name.into(),
            password: password.into(),
        }
    }

    /// The database user (identical to the database name).
    pub fn user(&self) -> &str {
        &self.name
    }
}
