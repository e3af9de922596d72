//! # Partitioner Module
//!
//! Splits a batch into kept representatives and dropped duplicates.
//!
//! ## Algorithm
//! Greedy, single pass, in upload order:
//! 1. Measure the Hamming distance from the incoming fingerprint to every
//!    fingerprint kept so far
//! 2. If the nearest one is within the threshold (inclusive), drop the
//!    incoming asset; its fingerprint is not remembered
//! 3. Otherwise keep it and remember its fingerprint
//!
//! The first shot of a scene always becomes its representative, and no two
//! kept fingerprints are ever within the threshold of each other.
//!
//! Cost is O(n·k) for k kept fingerprints, O(n²) when nothing repeats.
//! That is fine for a job's worth of photos; it does not scale to large
//! libraries.

mod threshold;

pub use threshold::Threshold;

use crate::core::hasher::Fingerprint;
use serde::{Deserialize, Serialize};

/// How close a dropped asset was to its representative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    /// Distance = 0, identical fingerprints
    Exact,
    /// Distance 1-4, virtually identical
    NearExact,
    /// Distance 5+, same scene under a looser threshold
    Similar,
}

impl MatchType {
    /// Classify based on Hamming distance
    pub fn from_distance(distance: u32) -> Self {
        match distance {
            0 => MatchType::Exact,
            1..=4 => MatchType::NearExact,
            _ => MatchType::Similar,
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::Exact => write!(f, "Exact Match"),
            MatchType::NearExact => write!(f, "Near-Exact Match"),
            MatchType::Similar => write!(f, "Similar"),
        }
    }
}

/// Outcome for one fingerprint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// New representative
    Kept,
    /// Within the threshold of the kept asset at input index `duplicate_of`
    Dropped { duplicate_of: usize, distance: u32 },
}

impl Classification {
    pub fn is_kept(&self) -> bool {
        matches!(self, Classification::Kept)
    }
}

/// A remembered representative
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeptFingerprint {
    /// Input index of the asset
    pub index: usize,
    pub fingerprint: Fingerprint,
}

/// Greedy partitioner owning the kept list for one batch
#[derive(Debug, Clone)]
pub struct Partitioner {
    threshold: Threshold,
    kept: Vec<KeptFingerprint>,
}

impl Partitioner {
    pub fn new(threshold: Threshold) -> Self {
        Self {
            threshold,
            kept: Vec::new(),
        }
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Kept fingerprints in the order they were kept
    pub fn kept(&self) -> &[KeptFingerprint] {
        &self.kept
    }

    /// Nearest kept fingerprint and its distance. Ties go to the one kept
    /// first.
    pub fn nearest(&self, fingerprint: &Fingerprint) -> Option<(KeptFingerprint, u32)> {
        let mut best: Option<(KeptFingerprint, u32)> = None;

        for candidate in &self.kept {
            let distance = candidate.fingerprint.distance(fingerprint);
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((*candidate, distance));
                if distance == 0 {
                    break;
                }
            }
        }

        best
    }

    /// Classify the asset at input `index`, remembering it if kept.
    ///
    /// Callers must feed assets in input order; the outcome depends on
    /// everything kept before.
    pub fn classify(&mut self, index: usize, fingerprint: Fingerprint) -> Classification {
        if let Some((nearest, distance)) = self.nearest(&fingerprint) {
            if self.threshold.is_duplicate(distance) {
                return Classification::Dropped {
                    duplicate_of: nearest.index,
                    distance,
                };
            }
        }

        self.kept.push(KeptFingerprint { index, fingerprint });
        Classification::Kept
    }
}

/// Partition a whole slice; each fingerprint's position is its input index.
pub fn partition(fingerprints: &[Fingerprint], threshold: Threshold) -> Vec<Classification> {
    let mut partitioner = Partitioner::new(threshold);
    fingerprints
        .iter()
        .enumerate()
        .map(|(index, fp)| partitioner.classify(index, *fp))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(bits: u64) -> Fingerprint {
        Fingerprint::from_bits(bits)
    }

    /// `base` with its lowest `n` bits flipped
    fn flipped(base: u64, n: u32) -> Fingerprint {
        let mask = if n == 64 { u64::MAX } else { (1u64 << n) - 1 };
        fp(base ^ mask)
    }

    #[test]
    fn match_type_from_distance() {
        assert_eq!(MatchType::from_distance(0), MatchType::Exact);
        assert_eq!(MatchType::from_distance(3), MatchType::NearExact);
        assert_eq!(MatchType::from_distance(5), MatchType::Similar);
        assert_eq!(MatchType::from_distance(40), MatchType::Similar);
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(partition(&[], Threshold::default()).is_empty());
    }

    #[test]
    fn first_fingerprint_is_always_kept() {
        assert_eq!(
            partition(&[fp(0xABCD)], Threshold::new(64).unwrap()),
            vec![Classification::Kept]
        );
    }

    #[test]
    fn near_match_is_dropped_distant_is_kept() {
        // H2 is H1 with 3 flips, H3 is H1 with 40 flips
        let h1 = fp(0);
        let h2 = flipped(0, 3);
        let h3 = flipped(0, 40);
        assert_eq!(h1.distance(&h3), 40);
        assert_eq!(h2.distance(&h3), 37);

        let result = partition(&[h1, h2, h3], Threshold::default());

        assert_eq!(
            result,
            vec![
                Classification::Kept,
                Classification::Dropped {
                    duplicate_of: 0,
                    distance: 3
                },
                Classification::Kept,
            ]
        );
    }

    #[test]
    fn threshold_is_inclusive() {
        let result = partition(&[fp(0), flipped(0, 5), flipped(0, 6)], Threshold::new(5).unwrap());

        assert!(result[0].is_kept());
        assert_eq!(
            result[1],
            Classification::Dropped {
                duplicate_of: 0,
                distance: 5
            }
        );
        assert!(result[2].is_kept());
    }

    #[test]
    fn dropped_fingerprints_are_not_remembered() {
        // B is within 4 of A and dropped; C is within 4 of B but 8 from A
        let a = fp(0);
        let b = fp(0x0F);
        let c = fp(0xFF);

        let result = partition(&[a, b, c], Threshold::new(4).unwrap());

        assert!(!result[1].is_kept());
        assert!(result[2].is_kept());
    }

    #[test]
    fn drop_points_at_nearest_kept() {
        let kept_far = fp(0xFFFF);
        let kept_near = fp(0);
        let incoming = fp(0b11);

        let mut partitioner = Partitioner::new(Threshold::new(10).unwrap());
        partitioner.kept.push(KeptFingerprint { index: 0, fingerprint: kept_far });
        partitioner.kept.push(KeptFingerprint { index: 1, fingerprint: kept_near });

        assert_eq!(
            partitioner.classify(2, incoming),
            Classification::Dropped {
                duplicate_of: 1,
                distance: 2
            }
        );
    }

    #[test]
    fn nearest_ties_go_to_first_kept() {
        let mut partitioner = Partitioner::new(Threshold::new(0).unwrap());
        partitioner.classify(0, fp(0b01));
        partitioner.classify(1, fp(0b10));

        let (nearest, distance) = partitioner.nearest(&fp(0)).unwrap();
        assert_eq!(nearest.index, 0);
        assert_eq!(distance, 1);
    }

    #[test]
    fn identical_copy_is_dropped_at_zero_threshold() {
        let result = partition(&[fp(42), fp(42)], Threshold::new(0).unwrap());
        assert_eq!(
            result[1],
            Classification::Dropped {
                duplicate_of: 0,
                distance: 0
            }
        );
    }

    #[test]
    fn order_decides_the_representative() {
        let a = fp(0);
        let b = flipped(0, 2);

        let forward = partition(&[a, b], Threshold::default());
        let backward = partition(&[b, a], Threshold::default());

        assert!(forward[0].is_kept() && !forward[1].is_kept());
        assert!(backward[0].is_kept() && !backward[1].is_kept());
    }

    #[test]
    fn larger_threshold_can_keep_more_when_a_hub_is_dropped() {
        // B is 6 from A; C, D, E are each 4 from B, 10 from A, 8 apart
        let a = fp(0);
        let b = fp(0x3F);
        let c = fp(0x3F | 0xF << 6);
        let d = fp(0x3F | 0xF << 10);
        let e = fp(0x3F | 0xF << 14);
        let batch = [a, b, c, d, e];

        let kept_at = |t: u32| {
            partition(&batch, Threshold::new(t).unwrap())
                .iter()
                .filter(|c| c.is_kept())
                .count()
        };

        assert_eq!(kept_at(5), 2);
        assert_eq!(kept_at(6), 4);
    }

    #[test]
    fn kept_list_tracks_input_indices() {
        let mut partitioner = Partitioner::new(Threshold::default());
        partitioner.classify(0, fp(0));
        partitioner.classify(1, fp(1));
        partitioner.classify(2, fp(u64::MAX));

        let indices: Vec<usize> = partitioner.kept().iter().map(|k| k.index).collect();
        assert_eq!(indices, vec![0, 2]);
    }
}
