//! Property checks for partitioning over pseudo-random fingerprint sets.

mod common;

use common::{clustered_fingerprints, random_fingerprints, XorShift};
use site_photo_dedup::core::hasher::Fingerprint;
use site_photo_dedup::core::partitioner::{partition, Classification, Threshold};

const SEEDS: std::ops::Range<u64> = 1..40;

fn kept_indices(classes: &[Classification]) -> Vec<usize> {
    classes
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_kept())
        .map(|(i, _)| i)
        .collect()
}

fn threshold(value: u32) -> Threshold {
    Threshold::new(value).unwrap()
}

#[test]
fn one_classification_per_input() {
    for seed in SEEDS {
        let fingerprints = clustered_fingerprints(seed, 4, 30, 3);
        assert_eq!(partition(&fingerprints, threshold(5)).len(), 30);
    }
}

#[test]
fn first_input_is_always_kept() {
    for seed in SEEDS {
        let fingerprints = clustered_fingerprints(seed, 3, 12, 4);
        for t in [0, 5, 64] {
            assert!(partition(&fingerprints, threshold(t))[0].is_kept());
        }
    }
}

#[test]
fn drops_point_back_to_an_earlier_kept_input_within_threshold() {
    for seed in SEEDS {
        let fingerprints = clustered_fingerprints(seed, 5, 40, 4);
        let classes = partition(&fingerprints, threshold(5));

        for (i, class) in classes.iter().enumerate() {
            if let Classification::Dropped {
                duplicate_of,
                distance,
            } = *class
            {
                assert!(duplicate_of < i);
                assert!(classes[duplicate_of].is_kept());
                assert_eq!(fingerprints[i].distance(&fingerprints[duplicate_of]), distance);
                assert!(distance <= 5);
            }
        }
    }
}

#[test]
fn kept_inputs_are_pairwise_beyond_threshold() {
    for seed in SEEDS {
        let fingerprints = clustered_fingerprints(seed, 6, 40, 6);
        for t in [2, 5, 10] {
            let kept = kept_indices(&partition(&fingerprints, threshold(t)));
            for (n, &a) in kept.iter().enumerate() {
                for &b in &kept[n + 1..] {
                    assert!(fingerprints[a].distance(&fingerprints[b]) > t);
                }
            }
        }
    }
}

#[test]
fn repartitioning_kept_fingerprints_keeps_them_all() {
    for seed in SEEDS {
        let fingerprints = clustered_fingerprints(seed, 5, 40, 5);
        let t = threshold(5);
        let kept: Vec<Fingerprint> = kept_indices(&partition(&fingerprints, t))
            .into_iter()
            .map(|i| fingerprints[i])
            .collect();

        let again = partition(&kept, t);

        assert!(again.iter().all(|c| c.is_kept()));
    }
}

#[test]
fn raising_threshold_never_revives_drops_between_separated_scenes() {
    // Scenes are 2 flips wide at most (diameter 4) and far apart
    for seed in SEEDS {
        let fingerprints = clustered_fingerprints(seed, 4, 30, 2);

        let mut min_gap = u32::MAX;
        for (n, a) in fingerprints.iter().enumerate() {
            for b in &fingerprints[n + 1..] {
                let d = a.distance(b);
                if d > 4 {
                    min_gap = min_gap.min(d);
                }
            }
        }

        let mut previous: Option<Vec<Classification>> = None;
        for t in 4..min_gap.min(65) {
            let classes = partition(&fingerprints, threshold(t));
            if let Some(prev) = previous {
                for (before, after) in prev.iter().zip(&classes) {
                    assert!(!(!before.is_kept() && after.is_kept()));
                }
            }
            previous = Some(classes);
        }
    }
}

#[test]
fn zero_threshold_keeps_each_distinct_fingerprint_once() {
    for seed in SEEDS {
        let mut rng = XorShift::new(seed);
        let pool = random_fingerprints(seed, 5);
        let fingerprints: Vec<Fingerprint> = (0..25)
            .map(|_| pool[rng.below(5) as usize])
            .collect();

        let kept = kept_indices(&partition(&fingerprints, threshold(0)));

        let mut distinct = fingerprints.clone();
        distinct.sort_by_key(|f| f.bits());
        distinct.dedup();
        assert_eq!(kept.len(), distinct.len());
    }
}

#[test]
fn maximum_threshold_keeps_only_the_first() {
    for seed in SEEDS {
        let fingerprints = random_fingerprints(seed, 20);
        assert_eq!(kept_indices(&partition(&fingerprints, threshold(64))), vec![0]);
    }
}

#[test]
fn distance_is_symmetric_with_zero_self_distance() {
    for seed in SEEDS {
        let fingerprints = random_fingerprints(seed, 16);
        for a in &fingerprints {
            assert_eq!(a.distance(a), 0);
            for b in &fingerprints {
                assert_eq!(a.distance(b), b.distance(a));
            }
        }
    }
}

#[test]
fn identical_copy_is_dropped_at_every_threshold() {
    for seed in SEEDS {
        let fingerprint = random_fingerprints(seed, 1)[0];
        for t in 0..=64 {
            let classes = partition(&[fingerprint, fingerprint], threshold(t));
            assert_eq!(
                classes[1],
                Classification::Dropped {
                    duplicate_of: 0,
                    distance: 0
                }
            );
        }
    }
}
