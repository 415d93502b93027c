//! The normalized trade record flowing from the message filter to the sink.

use super::symbol::{SYMBOL_LEN, symbol_from_bytes, symbol_to_bytes};

/// The most recent trade observation for one instrument.
///
/// Exactly one instance is produced per accepted inbound frame. The record is
/// immutable once constructed and is moved by value into the sink hand-off;
/// no part of the pipeline retains a reference after the move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeUpdate {
    symbol: [u8; SYMBOL_LEN],
    /// Last trade price.
    pub price: f64,
}

impl TradeUpdate {
    /// Build a record from a raw symbol and price.
    ///
    /// The symbol is copied into the fixed buffer, truncated if it exceeds
    /// the bound (see [`symbol_to_bytes`]).
    pub fn new(symbol: &str, price: f64) -> Self {
        Self { symbol: symbol_to_bytes(symbol), price }
    }

    /// The instrument symbol, up to the first null byte.
    pub fn symbol(&self) -> &str {
        symbol_from_bytes(&self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construct_and_read_back() {
        let update = TradeUpdate::new("BINANCE:SOLUSDT", 21.5);
        assert_eq!(update.symbol(), "BINANCE:SOLUSDT");
        assert!((update.price - 21.5).abs() < f64::EPSILON);
    }

    #[test]
    fn oversized_symbol_is_truncated() {
        let long = "X".repeat(SYMBOL_LEN * 2);
        let update = TradeUpdate::new(&long, 1.0);
        assert_eq!(update.symbol().len(), SYMBOL_LEN - 1);
    }
}
