//! Difference Hash (dHash) implementation.
//!
//! Compares each pixel of a 9x8 grayscale thumbnail with its right-hand
//! neighbour. Cheaper than pHash and fine for re-encoded copies, but less
//! tolerant of viewpoint changes. The image_hasher crate does the work.

use super::super::traits::{Fingerprint, HashAlgorithm, HashAlgorithmKind};
use crate::core::decoder::DecodedImage;
use image_hasher::{HashAlg, HasherConfig};

/// Gradient hasher producing 64-bit fingerprints
pub struct DifferenceHasher {
    hasher: image_hasher::Hasher,
}

impl DifferenceHasher {
    pub fn new() -> Self {
        let hasher = HasherConfig::new()
            .hash_size(8, 8)
            .hash_alg(HashAlg::Gradient)
            .to_hasher();

        Self { hasher }
    }
}

impl Default for DifferenceHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl HashAlgorithm for DifferenceHasher {
    fn hash_image(&self, image: &DecodedImage) -> Fingerprint {
        let hash = self.hasher.hash_image(image.as_dynamic());
        Fingerprint::from_be_slice(hash.as_bytes())
    }

    fn kind(&self) -> HashAlgorithmKind {
        HashAlgorithmKind::Difference
    }
}
