//! Error Types
//!
//! This module defines the error types used throughout Skyisle.
//!
//! # Overview
//!
//! The main error type [`Error`] covers every failure mode of the core:
//! - Asset reading and decoding errors (grouped under [`AssetError`])
//! - Configuration parsing and validation errors
//! - Scene registry write-once violations
//! - Background task failures
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, Error>`.
//!
//! ```rust,ignore
//! use skyisle_core::errors::{Error, Result};
//!
//! fn load_config() -> Result<()> {
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Failures raised while reading or decoding a model resource.
#[derive(Error, Debug)]
pub enum AssetError {
    /// The requested resource does not exist.
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// The resource exists but could not be read.
    #[error("Failed to read asset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a supported model container.
    #[error("Unsupported asset format: {0}")]
    Format(String),

    /// The glTF document was rejected by the parser.
    #[error("glTF error: {0}")]
    Gltf(String),

    /// The glTF document parsed, but references data that is missing or malformed.
    #[error("Invalid asset data: {0}")]
    InvalidData(String),
}

/// The main error type for Skyisle.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// Reading or decoding a model failed.
    #[error(transparent)]
    Asset(#[from] AssetError),

    // ========================================================================
    // I/O & Parsing Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    Config(String),

    // ========================================================================
    // Scene Registry Errors
    // ========================================================================
    /// A registry slot that already holds an entity was written again.
    #[error("Registry slot `{0}` is already populated")]
    SlotOccupied(&'static str),

    // ========================================================================
    // Async & Threading Errors
    // ========================================================================
    /// Task join error (when a background decode fails to complete).
    #[error("Task join error: {0}")]
    TaskJoin(String),
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::TaskJoin(err.to_string())
    }
}

/// Alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
