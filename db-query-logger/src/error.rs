//! Error types shared across the query logger.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while resolving configuration or writing a
/// query log entry.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// A storage operation failed (permission denied, disk full, ...).
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An existing JSON log file could not be decoded as an array.
    #[error("corrupt JSON log {}: {reason}", path.display())]
    CorruptLog { path: PathBuf, reason: String },

    /// A configuration key did not match any registered component.
    #[error("unknown {kind} '{key}'")]
    UnknownComponent { kind: &'static str, key: String },

    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    #[error("invalid storage path: {0}")]
    InvalidPath(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl LoggerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoggerError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn unknown(kind: &'static str, key: &str) -> Self {
        LoggerError::UnknownComponent {
            kind,
            key: key.to_string(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LoggerError>;
