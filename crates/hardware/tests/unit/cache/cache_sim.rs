//! Cache Store Unit Tests.
//!
//! Verifies the line/set grid built by `Cache::new`: sizing, geometry
//! rejection, cold misses, warm hits, and isolation between sets.
//!
//! The cache is constructed directly from a `CacheConfig`; no trace or
//! simulator is needed.

use crate::common::harness::cache;
use csim_core::cache::{AccessOutcome, Cache};
use csim_core::common::SimError;
use csim_core::config::CacheConfig;
use rstest::rstest;

// ──────────────────────────────────────────────────────────
// Construction
// ──────────────────────────────────────────────────────────

/// A fresh cache has `2^s` sets of `E` invalid lines.
#[rstest]
#[case(0, 1)]
#[case(1, 2)]
#[case(4, 4)]
#[case(6, 8)]
fn new_cache_is_sized_and_empty(#[case] s: u32, #[case] e: usize) {
    let cache = cache(s, e, 4);
    assert_eq!(cache.num_sets(), 1 << s);
    for set in cache.sets() {
        assert_eq!(set.ways(), e);
        assert!(set.lines().iter().all(|line| !line.valid));
    }
}

/// The grid holds exactly the line count the geometry check reports.
#[rstest]
#[case(0, 2, 0)]
#[case(3, 4, 0)]
#[case(5, 1, 5)]
fn grid_matches_checked_line_count(#[case] s: u32, #[case] e: usize, #[case] b: u32) {
    let lines = CacheConfig::new(s, e, b).check_geometry().unwrap();
    let cache = cache(s, e, b);
    let built: usize = cache.sets().map(|set| set.ways()).sum();
    assert_eq!(built, lines);
    assert_eq!(cache.num_sets(), lines / e);
}

/// Zero associativity cannot be modelled.
#[test]
fn new_cache_rejects_zero_associativity() {
    let err = Cache::new(&CacheConfig::new(2, 0, 2)).unwrap_err();
    assert!(matches!(err, SimError::Configuration(_)));
}

/// Geometries whose grid cannot be allocated are rejected up front.
#[rstest]
#[case::too_many_sets(40, 1)]
#[case::wider_than_usize(70, 1)]
#[case::too_many_ways(20, 1 << 10)]
fn new_cache_rejects_oversized_grid(#[case] s: u32, #[case] e: usize) {
    let err = Cache::new(&CacheConfig::new(s, e, 0)).unwrap_err();
    assert!(matches!(err, SimError::Configuration(_)));
}

/// Degenerate `s = 0` / `b = 0` geometries are structurally valid.
#[test]
fn new_cache_accepts_zero_set_and_block_bits() {
    let cache = cache(0, 2, 0);
    assert_eq!(cache.num_sets(), 1);
    assert_eq!(cache.config(), &CacheConfig::new(0, 2, 0));
}

// ──────────────────────────────────────────────────────────
// Lookup
// ──────────────────────────────────────────────────────────

/// First access to any block is a compulsory miss into a free line.
#[test]
fn cold_access_fills() {
    let mut cache = cache(2, 2, 4);
    assert_eq!(cache.access(0x1000), AccessOutcome::MissFill);
    assert!(cache.contains(0x1000));
}

/// Second access to the same block hits.
#[test]
fn warm_access_hits() {
    let mut cache = cache(2, 2, 4);
    let _ = cache.access(0x1000);
    assert_eq!(cache.access(0x1000), AccessOutcome::Hit);
}

/// A different byte of the same block hits.
#[test]
fn same_block_different_offset_hits() {
    let mut cache = cache(2, 2, 4);
    let _ = cache.access(0x1000);
    assert_eq!(cache.access(0x100F), AccessOutcome::Hit);
    assert_eq!(cache.access(0x1010), AccessOutcome::MissFill);
}

/// `contains` reports presence without refreshing recency.
#[test]
fn contains_does_not_touch_ages() {
    let mut cache = cache(0, 2, 0);
    let _ = cache.access(0xA);
    let _ = cache.access(0xB);
    let before = cache.set(0).unwrap().clone();

    assert!(cache.contains(0xA));
    assert!(!cache.contains(0xC));
    assert_eq!(cache.set(0).unwrap(), &before);

    // 0xA is still the LRU line, so 0xC evicts it.
    assert_eq!(cache.access(0xC), AccessOutcome::MissEvict { evicted_tag: 0xA });
}

/// Out-of-range set indices have no view.
#[test]
fn set_view_out_of_range() {
    let cache = cache(1, 1, 0);
    assert!(cache.set(1).is_some());
    assert!(cache.set(2).is_none());
}

// ──────────────────────────────────────────────────────────
// Set isolation
// ──────────────────────────────────────────────────────────

/// Accesses to one set never age or evict lines of another.
#[test]
fn sets_are_independent() {
    // s=1, b=0: even addresses -> set 0, odd -> set 1.
    let mut cache = cache(1, 1, 0);
    assert_eq!(cache.access(0x1), AccessOutcome::MissFill);

    for addr in [0x0, 0x2, 0x4, 0x6] {
        let _ = cache.access(addr);
    }

    let odd = cache.set(1).unwrap();
    assert_eq!(odd.lines()[0].age, 0);
    assert_eq!(cache.access(0x1), AccessOutcome::Hit);
}

/// Direct-mapped conflict: every alternating access evicts the other block.
#[test]
fn direct_mapped_conflict_thrashes() {
    let mut cache = cache(1, 1, 0);
    assert_eq!(cache.access(0x10), AccessOutcome::MissFill);
    assert_eq!(cache.access(0x20), AccessOutcome::MissEvict { evicted_tag: 0x8 });
    assert_eq!(cache.access(0x10), AccessOutcome::MissEvict { evicted_tag: 0x10 });
}

/// Outcome predicates agree with the variants.
#[test]
fn outcome_predicates() {
    assert!(AccessOutcome::Hit.is_hit());
    assert!(AccessOutcome::MissFill.is_miss());
    assert!(!AccessOutcome::MissFill.is_eviction());
    let evict = AccessOutcome::MissEvict { evicted_tag: 3 };
    assert!(evict.is_miss() && evict.is_eviction());
    assert_eq!(evict.to_string(), "miss eviction");
}
