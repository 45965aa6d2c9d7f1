//! Simulator error definitions.
//!
//! Every error here is fatal to a run. They are raised while the run is being
//! set up (configuration, trace loading) or while results are written out; the
//! cache model itself is total and never produces one.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors surfaced to the caller of a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// The cache geometry or run parameters are missing or invalid.
    ///
    /// Covers a zero (unset) `s`, `E` or `b`, a missing trace source, and a
    /// geometry whose line grid cannot be represented in memory.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The trace source could not be opened or read.
    #[error("unable to read trace file '{}': {source}", path.display())]
    TraceUnavailable {
        /// Path of the trace that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A JSON configuration file could not be read.
    #[error("unable to read config file '{}': {source}", path.display())]
    ConfigFile {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A JSON configuration document is malformed.
    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The statistics could not be encoded as JSON.
    #[error("unable to encode statistics: {0}")]
    Encode(#[source] serde_json::Error),

    /// The results file could not be written.
    #[error("unable to write results to '{}': {source}", path.display())]
    Report {
        /// Destination of the results file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl SimError {
    /// Shorthand for a [`SimError::Configuration`] with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

/// Result alias used across the simulator.
pub type SimResult<T> = Result<T, SimError>;
