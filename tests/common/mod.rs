//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use site_photo_dedup::core::hasher::Fingerprint;
use std::io::Cursor;

/// Deterministic xorshift generator
pub struct XorShift(u64);

impl XorShift {
    pub fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1)
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    pub fn below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }
}

/// A scene: an 8x8 grid of flat grey blocks, levels 40..=200
pub fn scene(seed: u64, size: u32) -> DynamicImage {
    let mut rng = XorShift::new(seed);
    let levels: Vec<u8> = (0..64).map(|_| 40 + rng.below(161) as u8).collect();
    let block = (size / 8).max(1);

    let img = ImageBuffer::from_fn(size, size, |x, y| {
        let bx = (x / block).min(7) as usize;
        let by = (y / block).min(7) as usize;
        let v = levels[by * 8 + bx];
        Rgb([v, v, v])
    });
    DynamicImage::ImageRgb8(img)
}

pub fn brightened(image: &DynamicImage, delta: u8) -> DynamicImage {
    let mut rgb = image.to_rgb8();
    for pixel in rgb.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            *channel = channel.saturating_add(delta);
        }
    }
    DynamicImage::ImageRgb8(rgb)
}

pub fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), format)
        .expect("fixture encodes");
    buf
}

pub fn png(image: &DynamicImage) -> Vec<u8> {
    encode(image, ImageFormat::Png)
}

/// `count` fingerprints with no structure at all
pub fn random_fingerprints(seed: u64, count: usize) -> Vec<Fingerprint> {
    let mut rng = XorShift::new(seed);
    (0..count)
        .map(|_| Fingerprint::from_bits(rng.next_u64()))
        .collect()
}

/// Flip up to `max_flips` random bits
pub fn jitter(fingerprint: Fingerprint, rng: &mut XorShift, max_flips: u64) -> Fingerprint {
    let flips = rng.below(max_flips + 1);
    let mut bits = fingerprint.bits();
    for _ in 0..flips {
        bits ^= 1u64 << rng.below(64);
    }
    Fingerprint::from_bits(bits)
}

/// Bursts of near-identical fingerprints around a few random centres,
/// shuffled together the way a photographer revisits rooms
pub fn clustered_fingerprints(
    seed: u64,
    clusters: usize,
    count: usize,
    max_flips: u64,
) -> Vec<Fingerprint> {
    let mut rng = XorShift::new(seed);
    let centres: Vec<Fingerprint> = (0..clusters)
        .map(|_| Fingerprint::from_bits(rng.next_u64()))
        .collect();
    (0..count)
        .map(|_| {
            let centre = centres[rng.below(clusters as u64) as usize];
            jitter(centre, &mut rng, max_flips)
        })
        .collect()
}
