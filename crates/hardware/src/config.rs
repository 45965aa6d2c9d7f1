//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures used to parameterize a run.
//! It provides:
//! 1. **Defaults:** Limits on the size of the modelled cache.
//! 2. **Structures:** [`CacheConfig`] (the `s`/`E`/`b` geometry) and [`SimConfig`]
//!    (geometry plus trace source and reporting options).
//! 3. **Validation:** Rejection of unset or unrepresentable geometries before any
//!    cache state is created.
//!
//! Configuration comes from command-line flags, from a JSON document, or from
//! both (flags override file values). A zero geometry field means "not
//! configured", so every field defaults to zero and validation reports it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::common::addr::{DecodedAddr, decode};
use crate::common::error::{SimError, SimResult};

/// Limits applied to configured geometries.
mod defaults {
    /// Upper bound on the total number of lines (`2^s * E`) in the modelled cache.
    ///
    /// Keeps the line grid within a few hundred MiB of host memory.
    pub const MAX_LINES: usize = 1 << 26;
}

pub use defaults::MAX_LINES;

/// Geometry of the simulated cache.
///
/// The cache has `2^set_bits` sets of `associativity` lines each; the low
/// `block_bits` of every address select a byte within a block and are ignored.
///
/// # Examples
///
/// ```
/// use csim_core::config::CacheConfig;
///
/// let config = CacheConfig::new(4, 2, 4);
/// assert_eq!(config.num_sets(), Some(16));
/// assert!(config.validate().is_ok());
/// assert!(CacheConfig::default().validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Number of set-index bits (`s`).
    #[serde(alias = "s")]
    pub set_bits: u32,
    /// Number of lines per set (`E`).
    #[serde(alias = "E")]
    pub associativity: usize,
    /// Number of block-offset bits (`b`).
    #[serde(alias = "b")]
    pub block_bits: u32,
}

impl CacheConfig {
    /// Creates a geometry from its `s`, `E` and `b` parameters.
    pub const fn new(set_bits: u32, associativity: usize, block_bits: u32) -> Self {
        Self {
            set_bits,
            associativity,
            block_bits,
        }
    }

    /// Number of sets (`2^s`), or `None` if it does not fit in a `usize`.
    pub const fn num_sets(&self) -> Option<usize> {
        1usize.checked_shl(self.set_bits)
    }

    /// Decodes `addr` into set index and tag under this geometry.
    #[inline]
    pub const fn decode(&self, addr: u64) -> DecodedAddr {
        decode(addr, self.set_bits, self.block_bits)
    }

    /// Checks that a line grid can be built for this geometry.
    ///
    /// Requires at least one line per set and a total line count no larger
    /// than [`MAX_LINES`]. Zero `s` or `b` is structurally fine. Returns the
    /// total number of lines.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] describing the first violation.
    pub fn check_geometry(&self) -> SimResult<usize> {
        if self.associativity == 0 {
            return Err(SimError::config("associativity (-E) must be at least 1"));
        }
        let total = self
            .num_sets()
            .and_then(|sets| sets.checked_mul(self.associativity))
            .filter(|&lines| lines <= MAX_LINES)
            .ok_or_else(|| {
                SimError::config(format!(
                    "cache of 2^{} sets x {} lines exceeds the {MAX_LINES}-line limit",
                    self.set_bits, self.associativity
                ))
            })?;
        Ok(total)
    }

    /// Validates the geometry at the configuration boundary.
    ///
    /// All of `s`, `E` and `b` must be strictly positive (zero means the value
    /// was never supplied) and the grid must pass [`Self::check_geometry`].
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] naming the offending parameter.
    pub fn validate(&self) -> SimResult<()> {
        if self.set_bits == 0 {
            return Err(SimError::config(
                "number of set index bits (-s) is missing or zero",
            ));
        }
        if self.associativity == 0 {
            return Err(SimError::config(
                "associativity (-E) is missing or zero",
            ));
        }
        if self.block_bits == 0 {
            return Err(SimError::config(
                "number of block bits (-b) is missing or zero",
            ));
        }
        let lines = self.check_geometry()?;
        tracing::debug!(
            sets = lines / self.associativity,
            ways = self.associativity,
            lines,
            "cache geometry validated"
        );
        Ok(())
    }
}

/// Complete description of one simulation run.
///
/// # Examples
///
/// ```
/// use csim_core::config::SimConfig;
///
/// let json = r#"{
///     "cache": { "s": 4, "E": 1, "b": 4 },
///     "trace": "traces/yi.trace",
///     "verbose": true
/// }"#;
///
/// let config = SimConfig::from_json_str(json).unwrap();
/// assert_eq!(config.cache.set_bits, 4);
/// assert!(config.verbose);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Cache geometry.
    pub cache: CacheConfig,
    /// Path of the trace to replay.
    pub trace: Option<PathBuf>,
    /// Report every record together with its outcomes.
    pub verbose: bool,
}

impl SimConfig {
    /// Parses a configuration from a JSON document.
    ///
    /// Missing fields take their "not configured" defaults; call
    /// [`Self::validate`] before using the result.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ConfigParse`] if the document is not valid JSON or
    /// has fields of the wrong type.
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ConfigFile`] if the file cannot be read and
    /// [`SimError::ConfigParse`] if its contents are invalid.
    pub fn from_json_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SimError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Validates the geometry and checks that a trace source is present.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] on the first problem found.
    pub fn validate(&self) -> SimResult<()> {
        self.cache.validate()?;
        if self.trace.is_none() {
            return Err(SimError::config("no trace file (-t) given"));
        }
        Ok(())
    }
}
