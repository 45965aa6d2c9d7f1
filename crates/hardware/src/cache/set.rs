//! Cache set and the age-based LRU replacement engine.
//!
//! A set resolves every access in a single scan over its lines:
//!
//! 1. A valid line holding the tag is a **hit**; its age drops to 0.
//! 2. Otherwise the lowest-index invalid line is **filled**.
//! 3. Otherwise the line with the greatest age is **evicted**. Ties go to the
//!    lowest index, since a later line must be strictly older to displace the
//!    current candidate.
//!
//! Independently of the outcome, every other line that was valid before the
//! access ages by one. The resulting order is exact LRU.
//!
//! # Performance
//!
//! - **Time Complexity:** O(E) per access, where E is the associativity
//! - **Space Complexity:** O(E) per set; no allocation after construction

use super::AccessOutcome;
use super::line::CacheLine;

/// A fixed-size group of `E` lines sharing one set index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheSet {
    lines: Box<[CacheLine]>,
}

impl CacheSet {
    /// Creates a set of `ways` invalid lines.
    ///
    /// Callers guarantee `ways >= 1`; see [`crate::config::CacheConfig::check_geometry`].
    pub(crate) fn new(ways: usize) -> Self {
        Self {
            lines: vec![CacheLine::default(); ways].into_boxed_slice(),
        }
    }

    /// Number of lines in the set.
    pub fn ways(&self) -> usize {
        self.lines.len()
    }

    /// Read-only view of the lines, in way order.
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// Returns true if a valid line holds `tag`. Does not touch recency.
    pub fn contains(&self, tag: u64) -> bool {
        self.lines.iter().any(|line| line.holds(tag))
    }

    /// Returns true if every line is valid.
    pub fn is_full(&self) -> bool {
        self.lines.iter().all(|line| line.valid)
    }

    /// Looks up `tag`, installing it on a miss and updating line ages.
    pub fn access(&mut self, tag: u64) -> AccessOutcome {
        let mut hit = false;
        let mut free = None;
        let mut victim = 0;
        let mut victim_age: Option<u64> = None;

        for (way, line) in self.lines.iter_mut().enumerate() {
            if line.holds(tag) {
                line.age = 0;
                hit = true;
            } else if !line.valid {
                if free.is_none() {
                    free = Some(way);
                }
            } else {
                line.age = line.age.saturating_add(1);
                if victim_age.is_none_or(|oldest| line.age > oldest) {
                    victim = way;
                    victim_age = Some(line.age);
                }
            }
        }

        if hit {
            return AccessOutcome::Hit;
        }

        if let Some(way) = free {
            self.lines[way].install(tag);
            return AccessOutcome::MissFill;
        }

        // No hit and no free line: every line is valid and was aged above,
        // so `victim` names the oldest of them.
        let line = &mut self.lines[victim];
        let evicted_tag = line.tag;
        line.install(tag);
        AccessOutcome::MissEvict { evicted_tag }
    }
}
