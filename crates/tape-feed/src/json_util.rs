//! Shared JSON parsing helpers.
//!
//! Extracted from the message parser to keep the common string-or-number
//! pattern in one place.

/// Parse a JSON value (string or number) as `f64`.
///
/// Handles the common feed pattern where numeric values may be encoded as
/// either JSON strings (`"21.50"`) or native numbers (`21.5`).
#[inline]
pub fn parse_str_f64(v: Option<&serde_json::Value>) -> Option<f64> {
    let v = v?;
    if let Some(s) = v.as_str() {
        fast_float2::parse(s).ok()
    } else {
        v.as_f64()
    }
}

/// Parse a named field on a JSON object as `f64` (string or number).
#[inline]
pub fn parse_f64_field(v: &serde_json::Value, key: &str) -> Option<f64> {
    parse_str_f64(v.get(key))
}
