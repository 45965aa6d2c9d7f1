//! # End-to-End Tests
//!
//! Runs complete simulations from trace text written to disk, covering the
//! reference scenarios and the fatal setup errors.

use crate::common::harness::{init_logging, run_config, run_trace_text, write_trace};
use csim_core::common::SimError;
use csim_core::config::{CacheConfig, SimConfig};
use csim_core::sim;
use csim_core::stats::CacheStats;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

/// Data accesses from a small valgrind run, as used in cache lab traces.
const YI_TRACE: &str = " L 10,1
 M 20,1
 L 22,1
 S 18,1
 L 110,1
 L 210,1
 M 12,1
";

fn stats(hits: u64, misses: u64, evictions: u64) -> CacheStats {
    CacheStats {
        hits,
        misses,
        evictions,
    }
}

#[test]
fn direct_mapped_single_line_sets_thrash() {
    // s=1, E=1, b=0: 0x10 and 0x20 both land in set 0 with different tags.
    let text = "L 0x10,1\nL 0x20,1\nL 0x10,1\n";
    assert_eq!(run_trace_text(1, 1, 0, text), stats(0, 3, 2));
}

#[test]
fn two_way_single_set_fills_without_eviction() {
    let text = "L 0x0,1\nL 0x8,1\nL 0x0,1\n";
    assert_eq!(run_trace_text(0, 2, 0, text), stats(1, 2, 0));
}

#[test]
fn yi_trace_direct_mapped() {
    // 16 sets of 16-byte blocks, direct mapped.
    assert_eq!(run_config(4, 1, 4, YI_TRACE), stats(4, 5, 3));
}

#[test]
fn yi_trace_two_way() {
    // 2 sets of 16-byte blocks, two lines each.
    assert_eq!(run_config(1, 2, 4, YI_TRACE), stats(4, 5, 2));
}

#[test]
fn instruction_lines_and_junk_do_not_count() {
    let text = "I 0400d7d4,8\n L 10,1\n==junk==\n I 0400d7d8,4\n L 10,1\n";
    assert_eq!(run_config(1, 1, 1, text), stats(1, 1, 0));
}

#[test]
fn identical_runs_are_deterministic() {
    let first = run_config(2, 2, 3, YI_TRACE);
    let second = run_config(2, 2, 3, YI_TRACE);
    assert_eq!(first, second);
}

#[test]
fn run_rejects_unset_geometry_before_reading_trace() {
    init_logging();
    let config = SimConfig {
        cache: CacheConfig::new(0, 1, 1),
        trace: Some(PathBuf::from("/nonexistent/never-read.trace")),
        verbose: false,
    };
    let err = sim::run(&config, None).unwrap_err();
    assert!(matches!(err, SimError::Configuration(_)));
}

#[test]
fn run_rejects_missing_trace_path() {
    let config = SimConfig {
        cache: CacheConfig::new(1, 1, 1),
        trace: None,
        verbose: false,
    };
    assert!(matches!(sim::run(&config, None), Err(SimError::Configuration(_))));
}

#[test]
fn run_reports_unreadable_trace() {
    let config = SimConfig {
        cache: CacheConfig::new(1, 1, 1),
        trace: Some(PathBuf::from("/nonexistent/missing.trace")),
        verbose: false,
    };
    assert!(matches!(
        sim::run(&config, None),
        Err(SimError::TraceUnavailable { .. })
    ));
}

#[test]
fn results_file_holds_three_counts() {
    let stats = run_config(4, 1, 4, YI_TRACE);
    let out = write_trace("");
    stats.write_results(out.path()).unwrap();
    let written = std::fs::read_to_string(out.path()).unwrap();
    assert_eq!(written, "4 5 3\n");
}
