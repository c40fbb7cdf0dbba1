//! Error types for the modtex batch tools.
//!
//! Per-item failures (one unreadable archive entry, one corrupt PNG) are
//! converted to counters by the callers; the error types here carry enough
//! context (file paths, messages) to log the failure before moving on.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for modtex operations.
#[derive(Error, Debug)]
pub enum ModtexError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Batch processing errors
    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Batch processing errors, organized by stage.
#[derive(Error, Debug)]
pub enum BatchError {
    /// Archive could not be opened or read as a zip container
    #[error("Archive error for {path}: {message}")]
    Archive { path: PathBuf, message: String },

    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Rewriting an image in place failed
    #[error("Write error for {path}: {message}")]
    Write { path: PathBuf, message: String },
}

/// Convenience type alias for modtex results.
pub type Result<T> = std::result::Result<T, ModtexError>;

/// Convenience type alias for batch-stage results.
pub type BatchResult<T> = std::result::Result<T, BatchError>;
