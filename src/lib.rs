//! # Site Photo Dedup
//!
//! Drops near-duplicate photos from a batch of job-site uploads before the
//! batch reaches volume estimation.
//!
//! ## Core Behaviour
//! - **First shot wins** - the earliest upload of a scene is the one kept
//! - **Order is preserved** - kept images come back in upload order
//! - **Bad uploads never sink a batch** - undecodable images are reported
//!   and left out of the comparison
//!
//! ## Architecture
//! - `core` - decoding, fingerprinting, partitioning and the batch pipeline
//! - `events` - progress reporting over channels
//! - `error` - error types
//! - `cli` - command-line interface (binary only)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{DedupError, Result};

/// Initialize tracing for the library
///
/// Called by the application entry point; the library never installs a
/// subscriber itself. Logs go to stderr so JSON output on stdout stays clean.
/// Calling it twice leaves the first subscriber in place.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
