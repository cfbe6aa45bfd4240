//! Error types for audit-console operations.
//!
//! This module defines [`ConsoleError`], the error type used for failures
//! that stop a command (bad configuration, broken terminal, I/O), and a
//! [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Server-side rejections and network failures of form submissions are
//!   not `ConsoleError`s: they are [`SubmitFailure`](crate::http::SubmitFailure)
//!   values that handlers show on the page and recover from
//! - Use `ConsoleError` for failures the user has to fix outside the console
//! - Use `anyhow::Error` (via `ConsoleError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for audit-console operations.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A server URL could not be built.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(String),

    /// A prompt could not be answered (closed terminal, missing answer).
    #[error("Prompt '{key}' failed: {message}")]
    Prompt { key: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for audit-console operations.
pub type Result<T> = std::result::Result<T, ConsoleError>;
