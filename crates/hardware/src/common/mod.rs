//! Common types shared across the cache simulator.
//!
//! This module provides the building blocks used by every other component:
//! 1. **Address Decoding:** Splitting addresses into set index and tag.
//! 2. **Error Handling:** The fatal error kinds a run can raise.

/// Address decomposition into set index and tag.
pub mod addr;

/// Error types and the crate-wide result alias.
pub mod error;

pub use addr::{DecodedAddr, decode};
pub use error::{SimError, SimResult};
