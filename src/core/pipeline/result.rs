//! Batch outcome types.

use crate::core::hasher::{Fingerprint, HashAlgorithmKind};
use crate::core::partitioner::MatchType;
use crate::events::BatchSummary;
use serde::{Deserialize, Serialize};

/// What happened to one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DuplicateDecision {
    /// New representative of its scene
    Kept,
    /// Near-duplicate of an earlier kept asset
    Dropped {
        /// Input index of the kept asset it matched
        duplicate_of: usize,
        duplicate_of_name: String,
        distance: u32,
        match_type: MatchType,
    },
    /// Could not be decoded; never compared with anything
    Unreadable { reason: String },
}

impl DuplicateDecision {
    pub fn is_kept(&self) -> bool {
        matches!(self, DuplicateDecision::Kept)
    }

    pub fn is_dropped(&self) -> bool {
        matches!(self, DuplicateDecision::Dropped { .. })
    }

    pub fn is_unreadable(&self) -> bool {
        matches!(self, DuplicateDecision::Unreadable { .. })
    }
}

/// Per-asset diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetReport {
    /// Position in the uploaded batch
    pub index: usize,
    pub name: String,
    pub decision: DuplicateDecision,
    /// Absent for unreadable assets
    pub fingerprint: Option<Fingerprint>,
}

/// Everything one run produced, in input order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    /// Every input name, in input order
    pub all_names: Vec<String>,
    /// Names of kept assets; a subsequence of `all_names`
    pub kept_names: Vec<String>,
    pub received_count: usize,
    pub after_dedup_count: usize,
    pub dropped_count: usize,
    pub unreadable_count: usize,
    pub threshold: u32,
    pub algorithm: HashAlgorithmKind,
    pub assets: Vec<AssetReport>,
    pub duration_ms: u64,
}

impl BatchResult {
    /// Derive names and counts from reports already in input order
    pub fn from_reports(
        assets: Vec<AssetReport>,
        threshold: u32,
        algorithm: HashAlgorithmKind,
        duration_ms: u64,
    ) -> Self {
        let all_names: Vec<String> = assets.iter().map(|a| a.name.clone()).collect();
        let kept_names: Vec<String> = assets
            .iter()
            .filter(|a| a.decision.is_kept())
            .map(|a| a.name.clone())
            .collect();
        let dropped_count = assets.iter().filter(|a| a.decision.is_dropped()).count();
        let unreadable_count = assets.iter().filter(|a| a.decision.is_unreadable()).count();

        Self {
            received_count: all_names.len(),
            after_dedup_count: kept_names.len(),
            all_names,
            kept_names,
            dropped_count,
            unreadable_count,
            threshold,
            algorithm,
            assets,
            duration_ms,
        }
    }

    /// Reports for kept assets, in input order
    pub fn kept(&self) -> impl Iterator<Item = &AssetReport> {
        self.assets.iter().filter(|a| a.decision.is_kept())
    }

    /// Reports for unreadable assets, in input order
    pub fn unreadable(&self) -> impl Iterator<Item = &AssetReport> {
        self.assets.iter().filter(|a| a.decision.is_unreadable())
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            received_count: self.received_count,
            after_dedup_count: self.after_dedup_count,
            dropped_count: self.dropped_count,
            unreadable_count: self.unreadable_count,
            duration_ms: self.duration_ms,
        }
    }
}
