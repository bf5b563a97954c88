//! Error types for cache construction and registry lookups.
//!
//! Misses are never errors: reads report absence through `Option`.

use std::fmt;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the boundary of a cache or registry call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Caller supplied an unusable argument: capacity below one, a missing
    /// miss factory, or an empty/whitespace store name.
    InvalidArgument(String),

    /// Configuration could not be parsed or loaded.
    ConfigError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::ConfigError(format!("Failed to parse store configuration: {}", e))
    }
}
