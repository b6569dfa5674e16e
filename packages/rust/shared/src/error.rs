//! Error types for contentindex.
//!
//! Library crates use [`ContentIndexError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all contentindex operations.
#[derive(Debug, thiserror::Error)]
pub enum ContentIndexError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The item snapshot could not be parsed or the records could not be encoded.
    #[error("snapshot error: {0}")]
    Snapshot(String),

    /// A content item lacks an element the search record requires.
    #[error("item '{codename}' is missing required element '{field}'")]
    MissingField { codename: String, field: String },

    /// Data validation error (unexpected shape, unknown item, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ContentIndexError>;

impl ContentIndexError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Report a missing or malformed required element on an item.
    pub fn missing_field(codename: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            codename: codename.into(),
            field: field.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
