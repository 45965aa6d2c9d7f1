//! Simulation statistics collection and reporting.
//!
//! This module tracks the three figures a cache run produces:
//! 1. **Hits:** Accesses that found their block present.
//! 2. **Misses:** Accesses that had to bring their block in.
//! 3. **Evictions:** Misses that displaced a valid block.
//!
//! Counters only ever grow and belong to a single run.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::cache::AccessOutcome;
use crate::common::error::{SimError, SimResult};

/// Hit, miss, and eviction totals for one simulation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Accesses that hit.
    pub hits: u64,
    /// Accesses that missed, with or without eviction.
    pub misses: u64,
    /// Misses that evicted a valid line.
    pub evictions: u64,
}

impl CacheStats {
    /// Accounts for one access outcome.
    #[inline]
    pub const fn record(&mut self, outcome: AccessOutcome) {
        match outcome {
            AccessOutcome::Hit => self.hits += 1,
            AccessOutcome::MissFill => self.misses += 1,
            AccessOutcome::MissEvict { .. } => {
                self.misses += 1;
                self.evictions += 1;
            }
        }
    }

    /// Total number of cache accesses (`hits + misses`).
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, or 0.0 before any access.
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Prints the one-line summary to stdout.
    pub fn print(&self) {
        println!("{self}");
    }

    /// Writes `hits misses evictions` on one line to `path`.
    ///
    /// This is the format grading harnesses read back.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Report`] if the file cannot be written.
    pub fn write_results(&self, path: impl AsRef<Path>) -> SimResult<()> {
        let path = path.as_ref();
        let line = format!("{} {} {}\n", self.hits, self.misses, self.evictions);
        fs::write(path, line).map_err(|source| SimError::Report {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl fmt::Display for CacheStats {
    /// Formats as `hits:H misses:M evictions:E`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits:{} misses:{} evictions:{}",
            self.hits, self.misses, self.evictions
        )
    }
}
