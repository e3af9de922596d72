//! # Pipeline Module
//!
//! Runs a batch through decode, hash and partition.
//!
//! ## Stages
//! 1. **Fingerprint** - decode and hash every asset, in parallel on rayon
//! 2. **Partition** - greedy keep/drop pass, single-threaded, input order
//!
//! Parallelism never changes the outcome: fingerprints are collected back
//! into input order before partitioning starts, so the first shot of each
//! scene is always the one kept.

mod config;
mod executor;
mod result;

pub use config::DedupConfig;
pub use executor::{BatchDeduplicator, DeduplicatorBuilder};
pub use result::{AssetReport, BatchResult, DuplicateDecision};
