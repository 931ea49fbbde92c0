//! Error types for pagefeed
//!
//! This module defines the error hierarchy for the whole crate.
//! Fetch failures are recorded inside `PaginationState` snapshots, so the
//! error type is `Clone + PartialEq` and carries rendered messages rather
//! than boxed sources.

use thiserror::Error;

/// The main error type for pagefeed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ============================================================================
    // Page Fetch Errors
    // ============================================================================
    #[error("Page fetch failed: {message}")]
    Fetch { message: String },

    #[error("Out of bounds: requested up to {requested}, only {available} available")]
    OutOfBounds { requested: usize, available: usize },

    #[error("No more pages to fetch")]
    EndOfData,

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(String),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(String),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(String),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a fetch error
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Create an out of bounds error
    pub fn out_of_bounds(requested: usize, available: usize) -> Self {
        Self::OutOfBounds {
            requested,
            available,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if this error came from a page fetch
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Error::Fetch { .. } | Error::OutOfBounds { .. } | Error::EndOfData
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::JsonParse(e.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Self::YamlParse(e.to_string())
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Self::Fetch {
            message: format!("{e:#}"),
        }
    }
}

/// Result type alias for pagefeed
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
