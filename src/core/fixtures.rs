//! Image fixtures shared by the unit tests.

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use std::io::Cursor;

/// Small xorshift generator so fixtures are reproducible without extra crates
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
}

/// An 8x8 grid of flat grey blocks with levels in 40..=200.
///
/// Different seeds give unrelated scenes; the same seed at a different
/// `size` gives the same scene at another resolution.
pub fn block_pattern(seed: u64, size: u32) -> DynamicImage {
    let mut rng = XorShift::new(seed);
    let levels: Vec<u8> = (0..64).map(|_| 40 + (rng.next_u64() % 161) as u8).collect();
    let block = (size / 8).max(1);

    let img = ImageBuffer::from_fn(size, size, |x, y| {
        let bx = (x / block).min(7) as usize;
        let by = (y / block).min(7) as usize;
        let v = levels[by * 8 + bx];
        Rgb([v, v, v])
    });
    DynamicImage::ImageRgb8(img)
}

/// Same picture, uniformly brighter
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

pub fn encode_png(image: &DynamicImage) -> Vec<u8> {
    encode(image, ImageFormat::Png)
}
