//! Batch execution.

use super::config::DedupConfig;
use super::result::{AssetReport, BatchResult, DuplicateDecision};
use crate::core::asset::ImageAsset;
use crate::core::hasher::{Fingerprint, HashAlgorithm, HashAlgorithmKind};
use crate::core::partitioner::{Classification, MatchType, Partitioner, Threshold};
use crate::error::{ConfigError, DecodeError};
use crate::events::{
    null_sender, BatchEvent, BatchPhase, Event, EventSender, FingerprintEvent, PartitionEvent,
};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Builder for a [`BatchDeduplicator`]
#[derive(Debug, Clone, Default)]
pub struct DeduplicatorBuilder {
    config: DedupConfig,
}

impl DeduplicatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every setting at once
    pub fn config(mut self, config: DedupConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the duplicate threshold (validated by `build`)
    pub fn threshold(mut self, threshold: i64) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Set the hash algorithm
    pub fn algorithm(mut self, algorithm: HashAlgorithmKind) -> Self {
        self.config.algorithm = algorithm;
        self
    }

    /// Decode and hash on a dedicated pool of `workers` threads
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = Some(workers);
        self
    }

    /// Validate the settings and build the deduplicator
    pub fn build(self) -> Result<BatchDeduplicator, ConfigError> {
        let threshold = self.config.validate()?;

        let pool = match self.config.workers {
            Some(workers) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .thread_name(|i| format!("dedup-worker-{}", i))
                    .build()
                    .map_err(|e| ConfigError::WorkerPool(e.to_string()))?,
            ),
            None => None,
        };

        debug!(
            threshold = threshold.value(),
            algorithm = %self.config.algorithm,
            workers = ?self.config.workers,
            "deduplicator configured"
        );

        Ok(BatchDeduplicator {
            threshold,
            hasher: self.config.algorithm.hasher(),
            pool,
        })
    }
}

/// Collapses near-duplicate images in a batch.
///
/// Holds no per-batch state: every run starts from an empty kept list, so
/// one deduplicator can serve many batches, concurrently if needed.
pub struct BatchDeduplicator {
    threshold: Threshold,
    hasher: Box<dyn HashAlgorithm>,
    pool: Option<ThreadPool>,
}

impl BatchDeduplicator {
    /// Create a new builder
    pub fn builder() -> DeduplicatorBuilder {
        DeduplicatorBuilder::new()
    }

    /// Use a custom hasher on rayon's global pool
    pub fn with_hasher(threshold: Threshold, hasher: Box<dyn HashAlgorithm>) -> Self {
        Self {
            threshold,
            hasher,
            pool: None,
        }
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn algorithm(&self) -> HashAlgorithmKind {
        self.hasher.kind()
    }

    /// Deduplicate a batch without progress events
    pub fn run(&self, assets: &[ImageAsset]) -> BatchResult {
        self.run_with_events(assets, &null_sender())
    }

    /// Deduplicate a batch, reporting progress.
    ///
    /// Unreadable assets are reported in the result, never as an error.
    pub fn run_with_events(&self, assets: &[ImageAsset], events: &EventSender) -> BatchResult {
        let start_time = Instant::now();
        info!(received = assets.len(), "batch started");
        events.send(Event::Batch(BatchEvent::Started {
            received: assets.len(),
        }));

        // Phase 1: decode + hash, in parallel
        events.send(Event::Batch(BatchEvent::PhaseChanged {
            phase: BatchPhase::Fingerprinting,
        }));
        let fingerprints = match &self.pool {
            Some(pool) => pool.install(|| self.fingerprint_all(assets, events)),
            None => self.fingerprint_all(assets, events),
        };

        // Phase 2: partition, strictly in input order
        events.send(Event::Batch(BatchEvent::PhaseChanged {
            phase: BatchPhase::Partitioning,
        }));
        let reports = self.partition_in_order(assets, fingerprints, events);

        let result = BatchResult::from_reports(
            reports,
            self.threshold.value(),
            self.algorithm(),
            start_time.elapsed().as_millis() as u64,
        );

        info!(
            received = result.received_count,
            kept = result.after_dedup_count,
            dropped = result.dropped_count,
            unreadable = result.unreadable_count,
            duration_ms = result.duration_ms,
            "batch complete"
        );
        events.send(Event::Batch(BatchEvent::Completed {
            summary: result.summary(),
        }));

        result
    }

    /// Decode and hash every asset. Output order matches input order
    /// whatever order the workers finish in.
    fn fingerprint_all(
        &self,
        assets: &[ImageAsset],
        events: &EventSender,
    ) -> Vec<Result<Fingerprint, DecodeError>> {
        let total = assets.len();
        let completed = AtomicUsize::new(0);

        events.send(Event::Fingerprint(FingerprintEvent::Started { total }));

        let fingerprints: Vec<Result<Fingerprint, DecodeError>> = assets
            .par_iter()
            .map(|asset| {
                let outcome = self.hasher.hash_bytes(asset.bytes());
                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;

                match &outcome {
                    Ok(fingerprint) => {
                        debug!(asset = asset.name(), %fingerprint, "fingerprinted");
                    }
                    Err(e) => {
                        warn!(asset = asset.name(), error = %e, "unreadable asset skipped");
                        events.send(Event::Fingerprint(FingerprintEvent::Unreadable {
                            name: asset.name().to_string(),
                            message: e.to_string(),
                        }));
                    }
                }

                events.send(Event::Fingerprint(FingerprintEvent::Progress {
                    completed: done,
                    total,
                    name: asset.name().to_string(),
                }));

                outcome
            })
            .collect();

        let unreadable = fingerprints.iter().filter(|f| f.is_err()).count();
        events.send(Event::Fingerprint(FingerprintEvent::Completed {
            fingerprinted: total - unreadable,
            unreadable,
        }));

        fingerprints
    }

    /// Single-threaded greedy pass over the fingerprints in input order
    fn partition_in_order(
        &self,
        assets: &[ImageAsset],
        fingerprints: Vec<Result<Fingerprint, DecodeError>>,
        events: &EventSender,
    ) -> Vec<AssetReport> {
        let mut partitioner = Partitioner::new(self.threshold);
        let mut reports = Vec::with_capacity(assets.len());
        let (mut kept, mut dropped) = (0, 0);

        for (index, (asset, outcome)) in assets.iter().zip(fingerprints).enumerate() {
            let name = asset.name().to_string();

            let report = match outcome {
                Ok(fingerprint) => {
                    let decision = match partitioner.classify(index, fingerprint) {
                        Classification::Kept => {
                            kept += 1;
                            events.send(Event::Partition(PartitionEvent::Kept {
                                name: name.clone(),
                            }));
                            DuplicateDecision::Kept
                        }
                        Classification::Dropped {
                            duplicate_of,
                            distance,
                        } => {
                            dropped += 1;
                            let duplicate_of_name = assets[duplicate_of].name().to_string();
                            debug!(
                                asset = %name,
                                duplicate_of = %duplicate_of_name,
                                distance,
                                "dropped near-duplicate"
                            );
                            events.send(Event::Partition(PartitionEvent::Dropped {
                                name: name.clone(),
                                duplicate_of: duplicate_of_name.clone(),
                                distance,
                            }));
                            DuplicateDecision::Dropped {
                                duplicate_of,
                                duplicate_of_name,
                                distance,
                                match_type: MatchType::from_distance(distance),
                            }
                        }
                    };

                    AssetReport {
                        index,
                        name,
                        decision,
                        fingerprint: Some(fingerprint),
                    }
                }
                Err(e) => AssetReport {
                    index,
                    name,
                    decision: DuplicateDecision::Unreadable {
                        reason: e.to_string(),
                    },
                    fingerprint: None,
                },
            };

            reports.push(report);
        }

        events.send(Event::Partition(PartitionEvent::Completed { kept, dropped }));
        reports
    }
}
