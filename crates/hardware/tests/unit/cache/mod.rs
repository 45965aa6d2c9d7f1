//! Cache model tests.

/// Line/set store behaviour: construction, lookup, and set isolation.
pub mod cache_sim;
