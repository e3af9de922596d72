//! # Hasher Module
//!
//! Reduces a decoded image to a 64-bit fingerprint that survives small
//! changes in viewpoint, exposure and compression.
//!
//! ## Supported Algorithms
//! - **pHash (Perceptual Hash)** - DCT-based, the default
//! - **dHash (Difference Hash)** - gradient-based, faster, less tolerant
//!
//! ## How It Works
//! 1. Resize image to a small square
//! 2. Convert to grayscale
//! 3. Derive bits from relationships between values (never absolute levels)
//! 4. Compare fingerprints using Hamming distance
//!
//! ## Example
//! ```rust,ignore
//! use site_photo_dedup::core::hasher::HashAlgorithmKind;
//!
//! let hasher = HashAlgorithmKind::Perceptual.hasher();
//! let fingerprint = hasher.hash_bytes(asset.bytes())?;
//! ```

mod algorithms;
mod dct;
pub mod fast_resize;
mod traits;

pub use algorithms::{DifferenceHasher, PerceptualHasher};
pub use traits::{Fingerprint, HashAlgorithm, HashAlgorithmKind};

impl HashAlgorithmKind {
    /// Build the hasher for this algorithm
    pub fn hasher(self) -> Box<dyn HashAlgorithm> {
        match self {
            HashAlgorithmKind::Perceptual => Box::new(PerceptualHasher::new()),
            HashAlgorithmKind::Difference => Box::new(DifferenceHasher::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::{block_pattern, encode_png};
    use crate::error::DecodeError;

    #[test]
    fn hasher_matches_requested_kind() {
        for kind in [HashAlgorithmKind::Perceptual, HashAlgorithmKind::Difference] {
            assert_eq!(kind.hasher().kind(), kind);
        }
    }

    #[test]
    fn hash_bytes_decodes_then_hashes() {
        let bytes = encode_png(&block_pattern(31, 64));
        let hasher = HashAlgorithmKind::Perceptual.hasher();

        let first = hasher.hash_bytes(&bytes).unwrap();
        let second = hasher.hash_bytes(&bytes).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn hash_bytes_reports_decode_failure() {
        let hasher = HashAlgorithmKind::Perceptual.hasher();
        assert_eq!(hasher.hash_bytes(&[]).unwrap_err(), DecodeError::EmptyInput);
    }
}
