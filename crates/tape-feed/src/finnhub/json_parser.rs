//! Finnhub JSON message parser — the inbound filter.
//!
//! Classifies each inbound frame by its `type` field and extracts the most
//! recent trade from trade frames. Uses `serde_json` for parsing and
//! `fast-float2` for string-to-f64 conversion.

use tape_core::error::Rejection;
use tape_core::types::TradeUpdate;

use crate::json_util::parse_f64_field;

/// Parse one inbound frame into a normalized trade record.
///
/// Trade frames batch one or more updates in their `data` array; only the
/// last (most recent) entry is extracted, earlier entries in the same frame
/// are dropped. Every non-trade outcome is reported as a [`Rejection`] for
/// the dispatcher to log; none of them is fatal.
pub fn parse_message(text: &str) -> Result<TradeUpdate, Rejection> {
    let v: serde_json::Value = serde_json::from_str(text)?;

    let kind = v.get("type").and_then(|t| t.as_str()).ok_or(Rejection::MissingType)?;
    if kind != "trade" {
        return Err(match kind {
            "ping" => Rejection::Ping,
            other => Rejection::UnhandledType(other.to_string()),
        });
    }

    let data = v.get("data").and_then(|d| d.as_array()).ok_or(Rejection::EmptyData)?;
    let last = data.last().ok_or(Rejection::EmptyData)?;

    let price = parse_f64_field(last, "p").ok_or(Rejection::InvalidTradeFields)?;
    let symbol = last.get("s").and_then(|s| s.as_str()).ok_or(Rejection::InvalidTradeFields)?;

    Ok(TradeUpdate::new(symbol, price))
}

/// Build the subscription message for one instrument.
///
/// The message is idempotent on the server side, so re-sending it after a
/// reconnect is safe.
pub fn build_subscribe(symbol: &str) -> String {
    serde_json::json!({
        "type": "subscribe",
        "symbol": symbol
    })
    .to_string()
}
