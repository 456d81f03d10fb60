//! Error types for pyensure operations.
//!
//! This module defines [`PyensureError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Install failures get distinct variants so callers can tell a retry-exhausted
//!   package apart from a fresh failure
//! - Package-index failures never surface here; the resolver swallows them
//! - Use `anyhow::Error` (via `PyensureError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pyensure operations.
#[derive(Debug, Error)]
pub enum PyensureError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A subprocess could not be spawned or waited on.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// The package name or version cannot be passed to an installer.
    #[error("Invalid package specification '{spec}': {reason}")]
    InvalidPackageSpec { spec: String, reason: String },

    /// The per-package attempt cap was already reached in this session.
    #[error("Max install attempts reached for {package} ({attempts}). Skipping further attempts.")]
    MaxAttemptsReached { package: String, attempts: u32 },

    /// Nothing in the environment could run an install.
    #[error("No installer available for {package}: {message}")]
    NoInstallerAvailable { package: String, message: String },

    /// An installer reported success but the module still cannot be imported.
    #[error("Installed {package} but 'import {module}' failed")]
    ImportFailed { package: String, module: String },

    /// Every installation method was tried and none worked.
    #[error("Failed to install {package} with all available methods ({methods})")]
    AllMethodsFailed { package: String, methods: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PyensureError {
    /// Whether this error means the attempt cap short-circuited the install.
    pub fn is_retry_exhausted(&self) -> bool {
        matches!(self, PyensureError::MaxAttemptsReached { .. })
    }
}

/// Result type alias for pyensure operations.
pub type Result<T> = std::result::Result<T, PyensureError>;
