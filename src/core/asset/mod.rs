//! # Asset Module
//!
//! An uploaded image: a display name plus its raw bytes.
//!
//! Bytes are held behind an `Arc<[u8]>` so an asset is an immutable value.
//! Decoding borrows the buffer and never consumes it, and clones share the
//! same allocation.

use std::sync::Arc;

/// One uploaded image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    name: String,
    bytes: Arc<[u8]>,
}

impl ImageAsset {
    /// Create an asset from its display name and contents
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Display name (usually the uploaded filename)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw contents
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the contents in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl<N: Into<String>> From<(N, Vec<u8>)> for ImageAsset {
    fn from((name, bytes): (N, Vec<u8>)) -> Self {
        Self::new(name, bytes)
    }
}
