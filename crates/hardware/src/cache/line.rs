//! Cache line state.

/// One line of a cache set.
///
/// `age` is a relative recency counter rather than a timestamp: 0 marks the
/// most recently used line of its set, and each access to a different line of
/// the same set bumps it by one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Whether the line holds a block.
    pub valid: bool,
    /// Tag of the cached block; meaningless while `valid` is false.
    pub tag: u64,
    /// Accesses to other lines of the set since this one was last touched.
    pub age: u64,
}

impl CacheLine {
    /// Returns true if the line is valid and holds `tag`.
    #[inline(always)]
    pub const fn holds(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }

    /// Marks the line as the most recent holder of `tag`.
    #[inline(always)]
    pub(crate) const fn install(&mut self, tag: u64) {
        self.valid = true;
        self.tag = tag;
        self.age = 0;
    }
}
