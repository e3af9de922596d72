//! # Core Module
//!
//! The deduplication engine, independent of any front end.
//!
//! ## Modules
//! - `asset` - An uploaded image: name plus raw bytes
//! - `decoder` - Sniffs the format and decodes bytes into pixels
//! - `hasher` - Computes 64-bit perceptual fingerprints
//! - `partitioner` - Greedy keep/drop decisions over fingerprints
//! - `pipeline` - Runs a whole batch and builds the result
//! - `source` - Loads assets from files and directories
//! - `estimate` - Downstream volume estimation

pub mod asset;
pub mod decoder;
pub mod estimate;
pub mod hasher;
pub mod partitioner;
pub mod pipeline;
pub mod source;

#[cfg(test)]
mod fixtures;

// Re-export commonly used types
pub use asset::ImageAsset;
pub use hasher::{Fingerprint, HashAlgorithmKind};
pub use partitioner::{partition, Classification, MatchType, Threshold};
pub use pipeline::{BatchDeduplicator, BatchResult, DedupConfig, DuplicateDecision};
