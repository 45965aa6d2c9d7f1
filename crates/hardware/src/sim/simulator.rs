//! Simulator: owns the cache and its statistics side-by-side.
//!
//! Records are replayed strictly in order, one at a time. Loads and stores
//! access the cache once; a modify is a load followed by a store to the same
//! address, so it accesses twice and the second access observes the state
//! left by the first. Instruction fetches are skipped.

use crate::cache::{AccessOutcome, Cache};
use crate::common::error::SimResult;
use crate::config::CacheConfig;
use crate::stats::CacheStats;
use crate::trace::{AccessKind, AccessRecord};

/// Cache accesses performed while replaying one record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The record kind is not replayed.
    Skipped,
    /// A load or store.
    Single(AccessOutcome),
    /// A modify: the load's outcome, then the store's.
    Double(AccessOutcome, AccessOutcome),
}

impl RecordOutcome {
    /// Iterates over the individual access outcomes in order.
    pub fn iter(&self) -> impl Iterator<Item = AccessOutcome> {
        let pair = match *self {
            Self::Skipped => [None, None],
            Self::Single(a) => [Some(a), None],
            Self::Double(a, b) => [Some(a), Some(b)],
        };
        pair.into_iter().flatten()
    }
}

/// Receives every replayed record together with its outcome.
///
/// Used for verbose reporting; the simulator calls it once per record,
/// including skipped ones.
pub trait AccessObserver {
    /// Called after `record` has been applied to the cache.
    fn on_record(&mut self, record: &AccessRecord, outcome: &RecordOutcome);
}

/// Top-level simulator: cache state + run statistics.
#[derive(Debug)]
pub struct Simulator {
    cache: Cache,
    stats: CacheStats,
}

impl Simulator {
    /// Creates a simulator around an empty cache with the given geometry.
    ///
    /// # Errors
    ///
    /// Propagates [`Cache::new`] failures for unbuildable geometries.
    pub fn new(config: &CacheConfig) -> SimResult<Self> {
        let cache = Cache::new(config)?;
        tracing::debug!(
            sets = cache.num_sets(),
            ways = config.associativity,
            block_bits = config.block_bits,
            "cache initialized"
        );
        Ok(Self {
            cache,
            stats: CacheStats::default(),
        })
    }

    /// The simulated cache.
    pub const fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Statistics accumulated so far.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Consumes the simulator, returning its final statistics.
    pub fn into_stats(self) -> CacheStats {
        self.stats
    }

    /// Replays a single record.
    pub fn apply(&mut self, record: &AccessRecord) -> RecordOutcome {
        match record.kind {
            AccessKind::Load | AccessKind::Store => RecordOutcome::Single(self.access(record)),
            AccessKind::Modify => {
                let load = self.access(record);
                let store = self.access(record);
                RecordOutcome::Double(load, store)
            }
            AccessKind::Instruction => RecordOutcome::Skipped,
        }
    }

    /// Performs one cache access for `record` and accounts for it.
    fn access(&mut self, record: &AccessRecord) -> AccessOutcome {
        let decoded = self.cache.config().decode(record.address);
        let outcome = self.cache.access_decoded(decoded);
        self.stats.record(outcome);
        tracing::trace!(
            kind = ?record.kind,
            addr = record.address,
            set = decoded.set_index,
            tag = decoded.tag,
            ?outcome,
            "access"
        );
        outcome
    }

    /// Replays every record in order and returns the statistics afterwards.
    pub fn replay<I>(&mut self, records: I) -> CacheStats
    where
        I: IntoIterator<Item = AccessRecord>,
    {
        for record in records {
            let _ = self.apply(&record);
        }
        self.stats
    }

    /// Like [`Self::replay`], reporting each record to `observer`.
    pub fn replay_with<I>(&mut self, records: I, observer: &mut dyn AccessObserver) -> CacheStats
    where
        I: IntoIterator<Item = AccessRecord>,
    {
        for record in records {
            let outcome = self.apply(&record);
            observer.on_record(&record, &outcome);
        }
        self.stats
    }
}
