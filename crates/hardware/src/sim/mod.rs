//! Simulation driver.
//!
//! Provides the [`Simulator`] that replays records against a cache, and
//! [`run`], which performs a complete run from a [`SimConfig`]:
//! validate the configuration, load the trace, build the cache, replay.
//! Any fatal error is raised before the cache is created.

/// Record replay against an owned cache.
pub mod simulator;

pub use simulator::{AccessObserver, RecordOutcome, Simulator};

use crate::common::error::{SimError, SimResult};
use crate::config::SimConfig;
use crate::stats::CacheStats;
use crate::trace::{load_trace, parse_trace};

/// Runs the simulation described by `config` and returns its final statistics.
///
/// When `observer` is given it sees every record and its outcome.
///
/// # Errors
///
/// Returns [`SimError::Configuration`] for an invalid configuration and
/// [`SimError::TraceUnavailable`] if the trace cannot be read. No partial
/// statistics are produced in either case.
pub fn run(config: &SimConfig, observer: Option<&mut dyn AccessObserver>) -> SimResult<CacheStats> {
    config.validate()?;
    let path = config
        .trace
        .as_deref()
        .ok_or_else(|| SimError::config("no trace file (-t) given"))?;
    let text = load_trace(path)?;

    let mut sim = Simulator::new(&config.cache)?;
    let mut records = parse_trace(&text);
    let stats = match observer {
        Some(observer) => sim.replay_with(records.by_ref(), observer),
        None => sim.replay(records.by_ref()),
    };

    tracing::debug!(dropped = records.dropped(), "skipped malformed trace lines");
    tracing::info!(
        hits = stats.hits,
        misses = stats.misses,
        evictions = stats.evictions,
        "simulation complete"
    );
    Ok(stats)
}
