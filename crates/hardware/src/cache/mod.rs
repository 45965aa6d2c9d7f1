//! Set-Associative Cache Model.
//!
//! This module implements the line/set store of a set-associative cache and
//! the outcome of a single access against it. It provides:
//! 1. **Line grid:** `2^s` sets of `E` lines, allocated once and never resized.
//! 2. **Lookup:** Decoding an address and resolving it against its set.
//! 3. **Replacement:** Exact LRU through per-line age counters (see [`set`]).
//!
//! The model tracks presence and recency only; there is no timing, dirty
//! state, or write policy.

/// Per-line validity, tag, and age.
pub mod line;

/// Cache sets and the replacement engine.
pub mod set;

use std::fmt;

pub use self::line::CacheLine;
pub use self::set::CacheSet;
use crate::common::addr::DecodedAddr;
use crate::common::error::SimResult;
use crate::config::CacheConfig;

/// Result of one access to the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessOutcome {
    /// The block was present.
    Hit,
    /// The block was absent and was placed in a free line.
    MissFill,
    /// The block was absent and displaced the least recently used line.
    MissEvict {
        /// Tag of the block that was evicted.
        evicted_tag: u64,
    },
}

impl AccessOutcome {
    /// Returns true for [`AccessOutcome::Hit`].
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }

    /// Returns true for either kind of miss.
    pub const fn is_miss(self) -> bool {
        !self.is_hit()
    }

    /// Returns true if the access evicted a valid line.
    pub const fn is_eviction(self) -> bool {
        matches!(self, Self::MissEvict { .. })
    }
}

impl fmt::Display for AccessOutcome {
    /// Formats the outcome the way verbose trace output spells it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit => f.write_str("hit"),
            Self::MissFill => f.write_str("miss"),
            Self::MissEvict { .. } => f.write_str("miss eviction"),
        }
    }
}

/// A set-associative cache with LRU replacement.
#[derive(Clone, Debug)]
pub struct Cache {
    config: CacheConfig,
    sets: Vec<CacheSet>,
}

impl Cache {
    /// Builds an empty cache (every line invalid) for the given geometry.
    ///
    /// Only structural requirements are enforced here, so geometries with
    /// `s = 0` or `b = 0` are accepted; [`CacheConfig::validate`] applies the
    /// stricter rules used for user-supplied configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::SimError::Configuration`] if the associativity
    /// is zero or the line grid is too large to allocate.
    pub fn new(config: &CacheConfig) -> SimResult<Self> {
        let lines = config.check_geometry()?;
        let num_sets = lines / config.associativity;
        let sets = (0..num_sets)
            .map(|_| CacheSet::new(config.associativity))
            .collect();
        Ok(Self {
            config: *config,
            sets,
        })
    }

    /// Geometry the cache was built with.
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Number of sets (`2^s`).
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// Read-only view of the set at `index`, if it exists.
    pub fn set(&self, index: usize) -> Option<&CacheSet> {
        self.sets.get(index)
    }

    /// Iterates over all sets in index order.
    pub fn sets(&self) -> impl Iterator<Item = &CacheSet> {
        self.sets.iter()
    }

    /// Returns true if the block containing `addr` is cached. Does not touch recency.
    pub fn contains(&self, addr: u64) -> bool {
        let decoded = self.config.decode(addr);
        self.sets[decoded.set_index].contains(decoded.tag)
    }

    /// Accesses the block containing `addr`.
    #[inline]
    pub fn access(&mut self, addr: u64) -> AccessOutcome {
        let decoded = self.config.decode(addr);
        self.access_decoded(decoded)
    }

    /// Accesses an already decoded (set, tag) pair.
    ///
    /// `decoded` must come from this cache's geometry; the set index is
    /// always in range in that case.
    #[inline]
    pub fn access_decoded(&mut self, decoded: DecodedAddr) -> AccessOutcome {
        self.sets[decoded.set_index].access(decoded.tag)
    }
}
