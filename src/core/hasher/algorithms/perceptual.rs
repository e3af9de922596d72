//! Perceptual Hash (pHash) implementation.
//!
//! 1. Downsample to a 32x32 grayscale grid (drops fine detail, size and
//!    aspect differences)
//! 2. Take the 8x8 low-frequency corner of its 2-D DCT
//! 3. Compute the median of the 63 coefficients other than DC
//! 4. Set a bit for every coefficient above that median
//!
//! Bits depend only on how coefficients rank against each other, so a
//! uniform exposure change (which only moves DC) leaves the hash intact.
//!
//! Bit `i` of the row-major 8x8 block is stored at position `63 - i`; the DC
//! position is always 0, so at most 63 bits carry information.

use super::super::dct::low_frequency_block;
use super::super::fast_resize::resize_to_grayscale;
use super::super::traits::{Fingerprint, HashAlgorithm, HashAlgorithmKind};
use crate::core::decoder::DecodedImage;
use image::imageops::FilterType;
use image::GrayImage;
use tracing::warn;

/// Side of the grid the DCT runs on
const GRID_SIZE: u32 = 32;
/// Side of the low-frequency block that becomes the fingerprint
const BLOCK_SIZE: usize = 8;

/// DCT-based perceptual hasher
#[derive(Debug, Default, Clone, Copy)]
pub struct PerceptualHasher;

impl PerceptualHasher {
    pub fn new() -> Self {
        Self
    }

    fn grayscale_grid(&self, image: &DecodedImage) -> GrayImage {
        match resize_to_grayscale(image.as_dynamic(), GRID_SIZE, GRID_SIZE) {
            Ok(grid) => grid,
            Err(e) => {
                warn!(error = %e, "SIMD resize failed, falling back to image crate");
                image
                    .as_dynamic()
                    .resize_exact(GRID_SIZE, GRID_SIZE, FilterType::Triangle)
                    .to_luma8()
            }
        }
    }
}

/// Turn an 8x8 coefficient block into a fingerprint by comparing each AC
/// coefficient with the AC median.
pub(crate) fn fingerprint_from_block(block: &[f64]) -> Fingerprint {
    debug_assert_eq!(block.len(), BLOCK_SIZE * BLOCK_SIZE);

    let mut ac: Vec<f64> = block[1..].to_vec();
    ac.sort_by(|a, b| a.total_cmp(b));
    let median = ac[ac.len() / 2];

    let bits = block
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, &c)| c > median)
        .fold(0u64, |acc, (i, _)| acc | 1 << (63 - i));

    Fingerprint::from_bits(bits)
}

impl HashAlgorithm for PerceptualHasher {
    fn hash_image(&self, image: &DecodedImage) -> Fingerprint {
        let grid = self.grayscale_grid(image);
        let pixels: Vec<f64> = grid.pixels().map(|p| p.0[0] as f64).collect();

        let block = low_frequency_block(&pixels, GRID_SIZE as usize, BLOCK_SIZE);
        fingerprint_from_block(&block)
    }

    fn kind(&self) -> HashAlgorithmKind {
        HashAlgorithmKind::Perceptual
    }
}
