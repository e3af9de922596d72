//! # Error Module
//!
//! Error types for the batch deduplicator.
//!
//! ## Propagation
//! - **Per-asset** failures (`DecodeError`) never abort a batch. The pipeline
//!   folds them into that asset's decision and keeps going.
//! - **Batch-level** failures (`ConfigError`) are raised once, when the
//!   deduplicator is built, before any asset is touched.
//! - Messages always name the asset or path involved.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum DedupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Source(#[from] SourceError),

    #[error("Failed to render output: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised while decoding a single asset's bytes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Image data is empty")]
    EmptyInput,

    #[error("Unrecognized image format")]
    UnknownFormat,

    #[error("Corrupt {format} data: {reason}")]
    Corrupt { format: String, reason: String },

    #[error("Decoded image has no pixels ({width}x{height})")]
    ZeroDimensions { width: u32, height: u32 },
}

/// Batch-level configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid threshold: {value} (must be 0-64)")]
    InvalidThreshold { value: i64 },

    #[error("Invalid worker count: {value} (must be at least 1)")]
    InvalidWorkerCount { value: usize },

    #[error("Failed to start worker pool: {0}")]
    WorkerPool(String),

    #[error("Failed to read configuration file {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },
}

/// Errors raised by the hasher's resize step
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Resize failed: {0}")]
    Resize(String),
}

/// Errors raised while loading assets from the filesystem
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Input not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk directory {path}: {reason}")]
    Walk { path: PathBuf, reason: String },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, DedupError>;
