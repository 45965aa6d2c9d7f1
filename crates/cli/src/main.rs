//! Trace-driven cache simulator CLI.
//!
//! This binary replays a memory trace against a set-associative LRU cache and
//! prints the resulting hit, miss, and eviction counts. It performs:
//! 1. **Configuration:** Geometry from `-s/-E/-b` flags, optionally layered over a JSON file.
//! 2. **Replay:** Loads the trace and runs it through the cache model.
//! 3. **Reporting:** One-line or JSON summary on stdout, optional results file,
//!    optional per-record log with `-v`.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use csim_core::config::SimConfig;
use csim_core::sim::{self, AccessObserver, RecordOutcome};
use csim_core::trace::AccessRecord;
use csim_core::{SimError, SimResult};

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Set-associative cache simulator",
    long_about = "Replay a memory trace against a set-associative LRU cache and report hits, misses, and evictions.\n\nTrace lines have the form `<I|L|S|M> <hex-address>,<size>`; instruction fetches are ignored and a modify counts as a load plus a store.\n\nExamples:\n  csim -s 4 -E 1 -b 4 -t traces/yi.trace\n  csim -v -s 1 -E 2 -b 4 -t traces/dave.trace\n  csim --config cache.json --json"
)]
struct Cli {
    /// Number of set index bits (the cache has 2^s sets).
    #[arg(short = 's', value_name = "S")]
    set_bits: Option<u32>,

    /// Associativity (number of lines per set).
    #[arg(short = 'E', value_name = "E")]
    associativity: Option<usize>,

    /// Number of block bits (the block size is 2^b bytes).
    #[arg(short = 'b', value_name = "B")]
    block_bits: Option<u32>,

    /// Trace file to replay.
    #[arg(short = 't', value_name = "TRACEFILE")]
    trace: Option<PathBuf>,

    /// Print each trace record followed by its outcomes.
    #[arg(short, long)]
    verbose: bool,

    /// JSON configuration file; command-line flags override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the summary as JSON instead of `hits:H misses:M evictions:E`.
    #[arg(long)]
    json: bool,

    /// Also write `hits misses evictions` to this file.
    #[arg(long, value_name = "FILE")]
    results: Option<PathBuf>,
}

impl Cli {
    /// Builds the run configuration: file values first, then flag overrides.
    fn sim_config(&self) -> SimResult<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::from_json_file(path)?,
            None => SimConfig::default(),
        };
        if let Some(s) = self.set_bits {
            config.cache.set_bits = s;
        }
        if let Some(e) = self.associativity {
            config.cache.associativity = e;
        }
        if let Some(b) = self.block_bits {
            config.cache.block_bits = b;
        }
        if let Some(trace) = &self.trace {
            config.trace = Some(trace.clone());
        }
        config.verbose |= self.verbose;
        Ok(config)
    }
}

/// Writes every replayed record as `L 10,1 miss eviction`.
///
/// Skipped records (instruction fetches) produce no output. Write failures
/// are ignored; the summary is still printed.
#[derive(Debug)]
struct VerbosePrinter<W: Write> {
    out: W,
}

impl<W: Write> VerbosePrinter<W> {
    const fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> AccessObserver for VerbosePrinter<W> {
    fn on_record(&mut self, record: &AccessRecord, outcome: &RecordOutcome) {
        if matches!(outcome, RecordOutcome::Skipped) {
            return;
        }
        let mut line = record.to_string();
        for access in outcome.iter() {
            line.push(' ');
            line.push_str(&access.to_string());
        }
        let _ = writeln!(self.out, "{line}");
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the `warn` default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs one simulation and reports its statistics.
fn cmd_run(cli: &Cli) -> SimResult<()> {
    let config = cli.sim_config()?;
    tracing::debug!(?config, "resolved configuration");

    let mut printer = VerbosePrinter::new(io::stdout());
    let observer: Option<&mut dyn AccessObserver> = if config.verbose {
        Some(&mut printer)
    } else {
        None
    };
    let stats = sim::run(&config, observer)?;

    if cli.json {
        let json = serde_json::to_string_pretty(&stats).map_err(SimError::Encode)?;
        println!("{json}");
    } else {
        stats.print();
    }

    if let Some(path) = &cli.results {
        stats.write_results(path)?;
    }
    Ok(())
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = cmd_run(&cli) {
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    }
}
