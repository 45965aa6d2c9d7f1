//! Address decomposition.
//!
//! This module splits a 64-bit byte address into the fields a set-associative
//! cache indexes by. It provides the following:
//! 1. **Block offset:** The low `b` bits, ignored by the replacement policy.
//! 2. **Set index:** The next `s` bits, selecting one of `2^s` sets.
//! 3. **Tag:** Every bit above `s + b`, identifying the block within its set.
//!
//! Shift amounts of 64 or more are clamped instead of wrapping, so a geometry
//! with `s + b >= 64` yields a tag of 0 rather than undefined bits.

/// The set index and tag of a decoded address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecodedAddr {
    /// Index of the set the address maps to, in `0..2^s`.
    pub set_index: usize,
    /// High-order bits identifying the block within its set.
    pub tag: u64,
}

/// Logical right shift that saturates to 0 once `shift` reaches the word width.
#[inline(always)]
const fn shr_clamped(value: u64, shift: u32) -> u64 {
    match value.checked_shr(shift) {
        Some(v) => v,
        None => 0,
    }
}

/// Mask selecting the low `bits` bits of a word.
#[inline(always)]
const fn low_mask(bits: u32) -> u64 {
    match 1u64.checked_shl(bits) {
        Some(bit) => bit - 1,
        None => u64::MAX,
    }
}

/// Decodes `addr` for a cache with `set_bits` index bits and `block_bits` offset bits.
///
/// `set_index = (addr >> b) mod 2^s` and `tag = addr >> (s + b)`.
///
/// # Examples
///
/// ```
/// use csim_core::common::addr::{decode, DecodedAddr};
///
/// // 4 sets, 16-byte blocks: 0x1234 -> offset 0x4, set 3, tag 0x48.
/// assert_eq!(decode(0x1234, 2, 4), DecodedAddr { set_index: 3, tag: 0x48 });
/// ```
#[inline]
pub const fn decode(addr: u64, set_bits: u32, block_bits: u32) -> DecodedAddr {
    let set_index = shr_clamped(addr, block_bits) & low_mask(set_bits);
    let tag = shr_clamped(addr, set_bits.saturating_add(block_bits));
    DecodedAddr {
        set_index: set_index as usize,
        tag,
    }
}
