//! # composer-file-copy Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout composer-file-copy.
//! Configuration problems (a rule without `source`, a malformed settings
//! entry, an unreadable manifest) are kept distinct from path resolution
//! failures and from plain I/O errors, so callers and tests can tell them apart.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `FileCopyError`: A custom error enum using `thiserror` for domain errors
//! - `Result<T>`: A type alias for `anyhow::Result<T>`; I/O errors travel as
//!   `anyhow::Error` with context naming the path involved
//!
//! ## Examples
//!
//! ```rust
//! // Configuration errors are raised before any filesystem work starts.
//! return Err(FileCopyError::MissingField { field: "source", package: name.into() })?;
//!
//! // Checking for a specific error type after the fact:
//! let is_config = err
//!     .downcast_ref::<FileCopyError>()
//!     .map_or(false, FileCopyError::is_configuration);
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for composer-file-copy.
#[derive(Error, Debug)]
pub enum FileCopyError {
    #[error("The extra.file-copy.{field} setting is required to use this script handler (package {package}).")]
    MissingField {
        field: &'static str,
        package: String,
    },

    #[error("Malformed extra.file-copy entry in package {package}: {reason}")]
    MalformedEntry { package: String, reason: String },

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Target is invalid: {}", path.display())]
    InvalidTarget { path: PathBuf },

    #[error("Copy depth limit of {limit} exceeded at {}", path.display())]
    DepthExceeded { limit: usize, path: PathBuf },

    #[error("Filesystem error: {0}")]
    FileSystem(String),
}

impl FileCopyError {
    /// True for the configuration-class errors, which are raised before any
    /// filesystem mutation happens.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. } | Self::MalformedEntry { .. } | Self::Manifest(_) | Self::Config(_)
        )
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
