//! Deduplicator configuration.

use crate::core::hasher::HashAlgorithmKind;
use crate::core::partitioner::Threshold;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for a deduplicator.
///
/// `threshold` is kept as received (it may be negative or too large) and
/// only checked by [`DedupConfig::validate`], so a bad value is reported
/// as `InvalidThreshold` rather than as a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Maximum Hamming distance treated as a duplicate (0-64)
    pub threshold: i64,
    /// Fingerprint algorithm
    pub algorithm: HashAlgorithmKind,
    /// Size of a dedicated decode/hash pool (None = rayon's global pool)
    pub workers: Option<usize>,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            threshold: i64::from(Threshold::DEFAULT),
            algorithm: HashAlgorithmKind::default(),
            workers: None,
        }
    }
}

impl DedupConfig {
    /// Check every field, returning the validated threshold
    pub fn validate(&self) -> Result<Threshold, ConfigError> {
        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err(ConfigError::InvalidWorkerCount { value: workers });
            }
        }
        Threshold::try_from(self.threshold)
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let unreadable = |reason: String| ConfigError::Unreadable {
            path: path.to_path_buf(),
            reason,
        };

        let text = std::fs::read_to_string(path).map_err(|e| unreadable(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| unreadable(e.to_string()))
    }
}
