//! Structured error types for loading configuration sources.

use serde::Serialize;

/// Error produced by a format decoder.
pub type DecodeError = Box<dyn std::error::Error + Send + Sync>;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    SourceUnavailable,
    DecodeFailed,
    UnknownFormat,
}

/// A failed load. The store is left exactly as it was before the call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read config source '{name}': {source}")]
    SourceUnavailable {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode config source '{name}': {source}")]
    DecodeFailed {
        name: String,
        #[source]
        source: DecodeError,
    },

    #[error("no decoder for config source '{name}' (expected .json, .yaml, .yml or .toml)")]
    UnknownFormat { name: String },
}

impl Error {
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::SourceUnavailable { .. } => ErrorCode::SourceUnavailable,
            Error::DecodeFailed { .. } => ErrorCode::DecodeFailed,
            Error::UnknownFormat { .. } => ErrorCode::UnknownFormat,
        }
    }

    /// Name of the source the failed load was asked for.
    pub fn source_name(&self) -> &str {
        match self {
            Error::SourceUnavailable { name, .. }
            | Error::DecodeFailed { name, .. }
            | Error::UnknownFormat { name } => name,
        }
    }
}

/// Result type for load operations.
pub type Result<T> = std::result::Result<T, Error>;
