//! # Estimate Module
//!
//! The volume estimator sits downstream of deduplication and only ever sees
//! the kept images. The current estimator is a stub: it returns a fixed
//! payload and echoes the batch's names so callers can check what reached it.

use crate::core::pipeline::BatchResult;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Anything that can turn a deduplicated batch into a volume estimate
pub trait VolumeEstimator: Send + Sync {
    fn estimate(&self, batch: &BatchResult) -> VolumeEstimate;
}

/// Full estimate payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeEstimate {
    pub request_id: String,
    pub total_volume_m3: f64,
    pub volume_detail: VolumeDetail,
    pub items: Vec<EstimatedItem>,
    pub special_disposal: SpecialDisposal,
    pub warnings: Vec<String>,
    pub debug: EstimateDebug,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeDetail {
    pub base_volume_m3: f64,
    pub scene_volume_m3: f64,
    pub safety_factor: f64,
    pub rounded_rule: String,
}

/// One recognised item and its volume contribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatedItem {
    pub category: String,
    pub subtype: String,
    pub size_class: String,
    pub quantity: u32,
    pub volume_per_item_m3: f64,
    pub volume_total_m3: f64,
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecialDisposal {
    pub recycle_items: Vec<String>,
    pub hard_disposal_items: Vec<String>,
    pub dangerous_items: Vec<String>,
}

/// What the estimator received
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateDebug {
    pub received_images: Vec<String>,
    pub kept_images: Vec<String>,
    pub received_count: usize,
    pub after_dedup_count: usize,
}

impl EstimateDebug {
    pub fn from_batch(batch: &BatchResult) -> Self {
        Self {
            received_images: batch.all_names.clone(),
            kept_images: batch.kept_names.clone(),
            received_count: batch.received_count,
            after_dedup_count: batch.after_dedup_count,
        }
    }
}

/// `YYYYMMDDhhmmss-xxxxxx`: UTC time plus six random hex digits
pub fn new_request_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", Utc::now().format("%Y%m%d%H%M%S"), &suffix[..6])
}

/// Fixed-answer estimator
#[derive(Debug, Clone, Copy, Default)]
pub struct StubEstimator;

impl StubEstimator {
    pub fn new() -> Self {
        Self
    }

    fn items() -> Vec<EstimatedItem> {
        vec![
            EstimatedItem {
                category: "refrigerator".to_string(),
                subtype: "2-door".to_string(),
                size_class: "medium".to_string(),
                quantity: 1,
                volume_per_item_m3: 0.6,
                volume_total_m3: 0.6,
                flags: vec!["appliance recycling".to_string()],
            },
            EstimatedItem {
                category: "mattress".to_string(),
                subtype: "single".to_string(),
                size_class: "medium".to_string(),
                quantity: 1,
                volume_per_item_m3: 0.48,
                volume_total_m3: 0.48,
                flags: vec!["special disposal".to_string()],
            },
        ]
    }
}

impl VolumeEstimator for StubEstimator {
    fn estimate(&self, batch: &BatchResult) -> VolumeEstimate {
        VolumeEstimate {
            request_id: new_request_id(),
            total_volume_m3: 5.0,
            volume_detail: VolumeDetail {
                base_volume_m3: 4.5,
                scene_volume_m3: 2.0,
                safety_factor: 1.10,
                rounded_rule: "round up to 0.5 m3".to_string(),
            },
            items: Self::items(),
            special_disposal: SpecialDisposal {
                recycle_items: vec!["refrigerator (2-door)".to_string()],
                hard_disposal_items: vec!["mattress (single)".to_string()],
                dangerous_items: Vec::new(),
            },
            warnings: vec![
                "Large furniture above the 2nd floor may be included.".to_string(),
                "Mattresses are special-disposal items.".to_string(),
            ],
            debug: EstimateDebug::from_batch(batch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hasher::HashAlgorithmKind;
    use crate::core::pipeline::{AssetReport, DuplicateDecision};

    fn batch() -> BatchResult {
        let reports = vec![
            AssetReport {
                index: 0,
                name: "kitchen.jpg".to_string(),
                decision: DuplicateDecision::Kept,
                fingerprint: None,
            },
            AssetReport {
                index: 1,
                name: "kitchen_again.jpg".to_string(),
                decision: DuplicateDecision::Dropped {
                    duplicate_of: 0,
                    duplicate_of_name: "kitchen.jpg".to_string(),
                    distance: 1,
                    match_type: crate::core::partitioner::MatchType::NearExact,
                },
                fingerprint: None,
            },
        ];
        BatchResult::from_reports(reports, 5, HashAlgorithmKind::Perceptual, 3)
    }

    #[test]
    fn request_id_has_timestamp_and_suffix() {
        let id = new_request_id();
        let (stamp, suffix) = id.split_once('-').unwrap();

        assert_eq!(stamp.len(), 14);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn stub_payload_is_fixed() {
        let estimate = StubEstimator::new().estimate(&batch());

        assert_eq!(estimate.total_volume_m3, 5.0);
        assert_eq!(estimate.volume_detail.safety_factor, 1.10);
        assert_eq!(estimate.items.len(), 2);
        assert_eq!(estimate.items[1].volume_total_m3, 0.48);
        assert!(estimate.special_disposal.dangerous_items.is_empty());
        assert_eq!(estimate.warnings.len(), 2);
    }

    #[test]
    fn debug_echoes_batch_names() {
        let estimate = StubEstimator::new().estimate(&batch());

        assert_eq!(
            estimate.debug.received_images,
            vec!["kitchen.jpg", "kitchen_again.jpg"]
        );
        assert_eq!(estimate.debug.kept_images, vec!["kitchen.jpg"]);
        assert_eq!(estimate.debug.received_count, 2);
        assert_eq!(estimate.debug.after_dedup_count, 1);
    }

    #[test]
    fn serializes_with_flat_field_names() {
        let json = serde_json::to_value(StubEstimator::new().estimate(&batch())).unwrap();

        assert_eq!(json["volume_detail"]["rounded_rule"], "round up to 0.5 m3");
        assert_eq!(json["items"][0]["category"], "refrigerator");
        assert_eq!(json["debug"]["after_dedup_count"], 1);
    }
}
