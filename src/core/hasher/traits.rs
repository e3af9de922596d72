//! Fingerprint type and the hashing trait.

use crate::core::decoder::{DecodedImage, ImageDecoder};
use crate::error::DecodeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 64-bit image fingerprint.
///
/// Fingerprints are compared by Hamming distance only. Two shots of the
/// same scene rarely hash to the exact same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Width of every fingerprint, and the largest possible distance
    pub const BITS: u32 = 64;

    pub fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Build from big-endian bytes; short input is zero-padded, extra bytes ignored
    pub fn from_be_slice(bytes: &[u8]) -> Self {
        let mut buf = [0u8; 8];
        for (dst, src) in buf.iter_mut().zip(bytes) {
            *dst = *src;
        }
        Self(u64::from_be_bytes(buf))
    }

    pub fn bits(&self) -> u64 {
        self.0
    }

    /// Number of differing bit positions (0-64)
    pub fn distance(&self, other: &Self) -> u32 {
        (self.0 ^ other.0).count_ones()
    }

    /// Similarity as a percentage (0-100)
    pub fn similarity(&self, other: &Self) -> f64 {
        (1.0 - self.distance(other) as f64 / Self::BITS as f64) * 100.0
    }

    /// 16 lowercase hex digits
    pub fn to_hex(&self) -> String {
        format!("{:016x}", self.0)
    }

    /// Parse up to 16 hex digits; surrounding whitespace is ignored
    pub fn from_hex(hex: &str) -> Result<Self, std::num::ParseIntError> {
        u64::from_str_radix(hex.trim(), 16).map(Self)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for Fingerprint {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        hex.parse().map_err(serde::de::Error::custom)
    }
}

/// Available hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithmKind {
    /// DCT-based perceptual hash (pHash)
    #[default]
    Perceptual,
    /// Gradient hash (dHash)
    Difference,
}

impl HashAlgorithmKind {
    /// Get a human-readable description of the algorithm
    pub fn description(&self) -> &'static str {
        match self {
            HashAlgorithmKind::Perceptual => {
                "Perceptual Hash (pHash) - low-frequency DCT signs relative to their median"
            }
            HashAlgorithmKind::Difference => {
                "Difference Hash (dHash) - brightness gradients between neighbouring pixels"
            }
        }
    }
}

impl fmt::Display for HashAlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithmKind::Perceptual => write!(f, "pHash"),
            HashAlgorithmKind::Difference => write!(f, "dHash"),
        }
    }
}

/// Trait for hash algorithm implementations
pub trait HashAlgorithm: Send + Sync {
    /// Fingerprint an already decoded image. Never fails.
    fn hash_image(&self, image: &DecodedImage) -> Fingerprint;

    /// Decode raw bytes and fingerprint them
    fn hash_bytes(&self, bytes: &[u8]) -> Result<Fingerprint, DecodeError> {
        let image = ImageDecoder::decode(bytes)?;
        Ok(self.hash_image(&image))
    }

    /// Get the algorithm kind
    fn kind(&self) -> HashAlgorithmKind;
}
