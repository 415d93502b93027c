//! Fixed-size symbol utilities.
//!
//! The normalized trade record uses `[u8; 50]` for the instrument symbol so
//! it can be handed between tasks without heap allocation. This module
//! provides helpers to convert between `&str` and the fixed-size
//! representation.

/// Length of the fixed symbol buffer used in [`crate::types::TradeUpdate`].
pub const SYMBOL_LEN: usize = 50;

/// Write a UTF-8 symbol string into a fixed `[u8; SYMBOL_LEN]` buffer.
///
/// The string is copied byte-for-byte and the remaining bytes are zero-filled.
/// At most `SYMBOL_LEN - 1` bytes are copied, so the buffer always ends in at
/// least one null byte; longer input is silently truncated.
#[inline]
pub fn symbol_to_bytes(s: &str) -> [u8; SYMBOL_LEN] {
    let mut buf = [0u8; SYMBOL_LEN];
    let len = s.len().min(SYMBOL_LEN - 1);
    buf[..len].copy_from_slice(&s.as_bytes()[..len]);
    buf
}

/// Read a symbol from a fixed `[u8; SYMBOL_LEN]` buffer.
///
/// Returns the string up to the first null byte. Returns `""` if the buffer
/// starts with a null byte.
#[inline]
pub fn symbol_from_bytes(buf: &[u8; SYMBOL_LEN]) -> &str {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(SYMBOL_LEN);
    // SAFETY invariant: we only store valid UTF-8 via `symbol_to_bytes`.
    // Fall back to "" rather than panicking on a corrupted buffer.
    std::str::from_utf8(&buf[..end]).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let sym = "BINANCE:SOLUSDT";
        let buf = symbol_to_bytes(sym);
        assert_eq!(symbol_from_bytes(&buf), sym);
    }

    #[test]
    fn empty_symbol() {
        let buf = symbol_to_bytes("");
        assert_eq!(symbol_from_bytes(&buf), "");
    }

    #[test]
    fn max_length_symbol_keeps_trailing_null() {
        let sym = "A".repeat(SYMBOL_LEN - 1);
        let buf = symbol_to_bytes(&sym);
        assert_eq!(symbol_from_bytes(&buf), sym);
        assert_eq!(buf[SYMBOL_LEN - 1], 0);
    }

    #[test]
    fn truncation() {
        let sym = "A".repeat(SYMBOL_LEN + 10);
        let buf = symbol_to_bytes(&sym);
        assert_eq!(symbol_from_bytes(&buf).len(), SYMBOL_LEN - 1);
        assert_eq!(buf[SYMBOL_LEN - 1], 0);
    }
}
