//! Validated similarity threshold.

use crate::core::hasher::Fingerprint;
use crate::error::ConfigError;

/// Maximum Hamming distance at which two fingerprints count as the same
/// scene. Inclusive: a distance equal to the threshold is a duplicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Threshold(u32);

impl Threshold {
    /// Empirical default; not validated against a labelled dataset
    pub const DEFAULT: u32 = 5;

    /// Create a threshold in 0..=64
    pub fn new(value: u32) -> Result<Self, ConfigError> {
        if value > Fingerprint::BITS {
            return Err(ConfigError::InvalidThreshold {
                value: i64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Threshold 2: only near-identical shots merge
    pub fn strict() -> Self {
        Self(2)
    }

    /// Threshold 10: merges shots with noticeably different framing
    pub fn lenient() -> Self {
        Self(10)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// True when `distance` is within the threshold
    pub fn is_duplicate(&self, distance: u32) -> bool {
        distance <= self.0
    }

    /// Human-readable description
    pub fn description(&self) -> String {
        format!(
            "photos whose fingerprints differ in at most {} of {} bits are treated as the same scene",
            self.0,
            Fingerprint::BITS
        )
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<i64> for Threshold {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map_err(|_| ConfigError::InvalidThreshold { value })
            .and_then(Self::new)
    }
}

impl From<Threshold> for u32 {
    fn from(threshold: Threshold) -> Self {
        threshold.0
    }
}

impl std::fmt::Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_at_boundary() {
        let threshold = Threshold::new(5).unwrap();

        assert!(threshold.is_duplicate(4));
        assert!(threshold.is_duplicate(5));
        assert!(!threshold.is_duplicate(6));
    }

    #[test]
    fn zero_only_matches_identical() {
        let threshold = Threshold::new(0).unwrap();
        assert!(threshold.is_duplicate(0));
        assert!(!threshold.is_duplicate(1));
    }

    #[test]
    fn full_range_is_accepted() {
        assert!(Threshold::new(0).is_ok());
        assert!(Threshold::new(64).is_ok());
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert_eq!(
            Threshold::new(65).unwrap_err(),
            ConfigError::InvalidThreshold { value: 65 }
        );
        assert_eq!(
            Threshold::try_from(-1).unwrap_err(),
            ConfigError::InvalidThreshold { value: -1 }
        );
        assert_eq!(
            Threshold::try_from(i64::MAX).unwrap_err(),
            ConfigError::InvalidThreshold { value: i64::MAX }
        );
    }

    #[test]
    fn presets() {
        assert_eq!(Threshold::default().value(), 5);
        assert_eq!(Threshold::strict().value(), 2);
        assert_eq!(Threshold::lenient().value(), 10);
    }

    #[test]
    fn description_includes_value() {
        assert!(Threshold::new(7).unwrap().description().contains("at most 7"));
    }
}
