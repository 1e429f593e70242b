//! src/error.rs
//! ============================================================================
//! # `AppError`: Unified Error Type for the Registration Form
//!
//! Library operations return `Result<T, AppError>`. Nothing here ever reaches
//! the user verbatim: the submit boundary converts failures into notifications
//! and the binary wraps the rest with `anyhow` context.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Unified error type for all registration form operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// TOML config parsing error.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// TOML config serialisation error.
    #[error("Config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    /// Config file I/O error with path.
    #[error("Failed to access config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Platform config directory could not be resolved.
    #[error("Could not determine config directory")]
    ConfigDirUnavailable,

    /// HTTP client construction or transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a status outside the 2xx range.
    #[error("Endpoint {url} answered with status {status}")]
    HttpStatus { url: String, status: u16 },

    /// Input validation errors
    #[error("Invalid input: {field} - {message}")]
    InvalidInput {
        field: String, // "emp_dept", "emp_doj", etc.
        message: String,
    },
}

impl AppError {
    /// Create an input validation error
    pub fn invalid_input<S1: Into<String>, S2: Into<String>>(field: S1, message: S2) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a config I/O error bound to a path
    pub fn config_io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::ConfigIo {
            path: path.into(),
            source,
        }
    }

    /// Create an unexpected-status error
    pub fn http_status<S: Into<String>>(url: S, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Whether the failure happened below the HTTP status line (connect,
    /// TLS, timeout, body read) or as a non-2xx answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::HttpStatus { .. })
    }
}
