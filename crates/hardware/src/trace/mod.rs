//! Memory-access traces.
//!
//! This module turns trace text into access records. It provides:
//! 1. **Records:** [`AccessKind`] and [`AccessRecord`], one per trace line.
//! 2. **Parsing:** Line-level tokenizing that drops malformed input (see [`parser`]).
//! 3. **Loading:** Reading a whole trace file before replay starts, so an
//!    unreadable source fails the run before any cache state exists.
//!
//! Each trace line has the form `<kind> <hex-address>,<size>`, for example
//! ` L 7ff000398,8`.

/// Line tokenizer for trace text.
pub mod parser;

use std::fmt;
use std::fs;
use std::path::Path;

pub use self::parser::{parse_line, parse_trace};
use crate::common::error::{SimError, SimResult};

/// Kind of memory operation recorded in a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Instruction fetch (`I`). Parsed but never replayed.
    Instruction,
    /// Data load (`L`): one cache access.
    Load,
    /// Data store (`S`): one cache access.
    Store,
    /// Data modify (`M`): a load followed by a store to the same address.
    Modify,
}

impl AccessKind {
    /// Maps a trace kind letter to its access kind.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Self::Instruction),
            'L' => Some(Self::Load),
            'S' => Some(Self::Store),
            'M' => Some(Self::Modify),
            _ => None,
        }
    }

    /// Trace letter for this kind.
    pub const fn as_char(self) -> char {
        match self {
            Self::Instruction => 'I',
            Self::Load => 'L',
            Self::Store => 'S',
            Self::Modify => 'M',
        }
    }

    /// Number of cache accesses a record of this kind performs.
    pub const fn access_count(self) -> usize {
        match self {
            Self::Instruction => 0,
            Self::Load | Self::Store => 1,
            Self::Modify => 2,
        }
    }
}

/// One well-formed trace line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AccessRecord {
    /// Operation kind.
    pub kind: AccessKind,
    /// Byte address accessed.
    pub address: u64,
    /// Access width in bytes, if the line carried one. Has no effect on the cache.
    pub size: Option<u32>,
}

impl AccessRecord {
    /// Creates a record without a size field.
    pub const fn new(kind: AccessKind, address: u64) -> Self {
        Self {
            kind,
            address,
            size: None,
        }
    }

    /// Creates a data load record.
    pub const fn load(address: u64) -> Self {
        Self::new(AccessKind::Load, address)
    }

    /// Creates a data store record.
    pub const fn store(address: u64) -> Self {
        Self::new(AccessKind::Store, address)
    }

    /// Creates a data modify record.
    pub const fn modify(address: u64) -> Self {
        Self::new(AccessKind::Modify, address)
    }
}

impl fmt::Display for AccessRecord {
    /// Formats the record in trace syntax, e.g. `L 10,1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:x}", self.kind.as_char(), self.address)?;
        if let Some(size) = self.size {
            write!(f, ",{size}")?;
        }
        Ok(())
    }
}

/// Reads the trace at `path` into memory.
///
/// The file is read in full up front. Bytes that are not valid UTF-8 are
/// replaced, which makes the affected lines malformed rather than fatal.
///
/// # Errors
///
/// Returns [`SimError::TraceUnavailable`] if the file cannot be opened or read.
pub fn load_trace(path: impl AsRef<Path>) -> SimResult<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| SimError::TraceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded trace");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
