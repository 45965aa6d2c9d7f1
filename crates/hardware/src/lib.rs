//! Trace-driven set-associative cache simulator library.
//!
//! This crate replays memory-access traces against a cache model and counts
//! hits, misses, and evictions. It is organized as follows:
//! 1. **Common:** Address decoding and the fatal error kinds.
//! 2. **Cache:** The line/set grid and its exact-LRU replacement engine.
//! 3. **Trace:** Access records and the trace-file tokenizer.
//! 4. **Simulation:** Record replay and end-to-end runs.
//! 5. **Config and Stats:** Run parameters and result counters.
//!
//! # Examples
//!
//! ```
//! use csim_core::{AccessRecord, CacheConfig, Simulator};
//!
//! // One set of two lines, no block offset.
//! let mut sim = Simulator::new(&CacheConfig::new(0, 2, 0)).unwrap();
//! let stats = sim.replay([
//!     AccessRecord::load(0x0),
//!     AccessRecord::load(0x8),
//!     AccessRecord::load(0x0),
//! ]);
//! assert_eq!((stats.hits, stats.misses, stats.evictions), (1, 2, 0));
//! ```

/// Set-associative cache model (lines, sets, replacement).
pub mod cache;
/// Common types (address decoding, errors).
pub mod common;
/// Run configuration (geometry, trace source, reporting options).
pub mod config;
/// Simulation driver and record replay.
pub mod sim;
/// Hit/miss/eviction statistics.
pub mod stats;
/// Trace records, parsing, and loading.
pub mod trace;

/// Cache model; build with `Cache::new`.
pub use crate::cache::{AccessOutcome, Cache};
/// Fatal error type and result alias.
pub use crate::common::{SimError, SimResult};
/// Cache geometry and full run configuration.
pub use crate::config::{CacheConfig, SimConfig};
/// Replay driver; see also [`sim::run`].
pub use crate::sim::{AccessObserver, RecordOutcome, Simulator};
/// Final run statistics.
pub use crate::stats::CacheStats;
/// Access records.
pub use crate::trace::{AccessKind, AccessRecord};
