//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};

/// All events emitted while deduplicating a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Batch-level events
    Batch(BatchEvent),
    /// Decode + hash stage events
    Fingerprint(FingerprintEvent),
    /// Keep/drop decisions
    Partition(PartitionEvent),
}

/// Batch-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BatchEvent {
    /// A batch has been received
    Started { received: usize },
    /// Moving to a new phase
    PhaseChanged { phase: BatchPhase },
    /// Batch finished; every asset has a decision
    Completed { summary: BatchSummary },
}

/// Phases of a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchPhase {
    Fingerprinting,
    Partitioning,
}

impl std::fmt::Display for BatchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchPhase::Fingerprinting => write!(f, "Fingerprinting"),
            BatchPhase::Partitioning => write!(f, "Partitioning"),
        }
    }
}

/// Events from the decode + hash stage.
///
/// Progress events may arrive out of input order since this stage runs
/// in parallel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FingerprintEvent {
    Started {
        total: usize,
    },
    Progress {
        completed: usize,
        total: usize,
        name: String,
    },
    /// An asset could not be decoded; the batch continues
    Unreadable {
        name: String,
        message: String,
    },
    Completed {
        fingerprinted: usize,
        unreadable: usize,
    },
}

/// Events from the partitioning stage, always in input order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PartitionEvent {
    Kept {
        name: String,
    },
    Dropped {
        name: String,
        duplicate_of: String,
        distance: u32,
    },
    Completed {
        kept: usize,
        dropped: usize,
    },
}

/// Summary of a finished batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub received_count: usize,
    pub after_dedup_count: usize,
    pub dropped_count: usize,
    pub unreadable_count: usize,
    pub duration_ms: u64,
}
