//! Trace line tokenizer.
//!
//! Malformed lines are not errors: they are skipped and counted, so a trace
//! with stray comments or truncated lines still replays.

use std::iter::Enumerate;
use std::str::Lines;

use super::{AccessKind, AccessRecord};

/// Parses one trace line.
///
/// Accepts `<kind> <hex-address>[,<size>]` with any surrounding whitespace.
/// The address may carry a `0x` prefix; the size, when present, is decimal.
/// Returns `None` for blank or malformed lines.
///
/// # Examples
///
/// ```
/// use csim_core::trace::{parse_line, AccessKind};
///
/// let rec = parse_line(" M 0421c7f0,4").unwrap();
/// assert_eq!(rec.kind, AccessKind::Modify);
/// assert_eq!(rec.address, 0x0421_c7f0);
/// assert_eq!(rec.size, Some(4));
///
/// assert!(parse_line("X 10,1").is_none());
/// ```
pub fn parse_line(line: &str) -> Option<AccessRecord> {
    let line = line.trim();
    let mut chars = line.chars();
    let kind = AccessKind::from_char(chars.next()?)?;
    let operand = chars.as_str().trim_start();

    let (addr, size) = match operand.split_once(',') {
        Some((addr, size)) => (addr, Some(size.trim())),
        None => (operand, None),
    };

    let address = parse_hex(addr.trim_end())?;
    let size = match size {
        Some(s) => Some(s.parse::<u32>().ok()?),
        None => None,
    };

    Some(AccessRecord {
        kind,
        address,
        size,
    })
}

/// Parses a hexadecimal address with an optional `0x`/`0X` prefix.
fn parse_hex(s: &str) -> Option<u64> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(digits, 16).ok()
}

/// Iterator over the well-formed records of a trace, in order.
///
/// Blank lines are skipped silently; other unparsable lines are skipped and
/// counted in [`TraceRecords::dropped`].
#[derive(Debug, Clone)]
pub struct TraceRecords<'a> {
    lines: Enumerate<Lines<'a>>,
    dropped: usize,
}

impl TraceRecords<'_> {
    /// Number of non-blank lines skipped as malformed so far.
    pub const fn dropped(&self) -> usize {
        self.dropped
    }
}

impl Iterator for TraceRecords<'_> {
    type Item = AccessRecord;

    fn next(&mut self) -> Option<AccessRecord> {
        for (idx, line) in self.lines.by_ref() {
            if let Some(record) = parse_line(line) {
                return Some(record);
            }
            if !line.trim().is_empty() {
                self.dropped += 1;
                tracing::trace!(line = idx + 1, text = line, "dropping malformed trace line");
            }
        }
        None
    }
}

/// Parses every line of `text`, yielding well-formed records in order.
pub fn parse_trace(text: &str) -> TraceRecords<'_> {
    TraceRecords {
        lines: text.lines().enumerate(),
        dropped: 0,
    }
}
