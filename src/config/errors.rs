//! Configuration error types

use thiserror::Error;

/// Result type for configuration resolution
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors are fatal and occur before any external mutation.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Variable {0} not set")]
    MissingEnv(&'static str),

    #[error("HOME is not set and no explicit path was given")]
    MissingHome,
}
