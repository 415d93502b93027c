//! Configuration parsing for the tape recorder.
//!
//! Settings come from an optional JSON config file; every field has a
//! default, so the binary also runs with no file at all. The credential is
//! never stored in the file — only the name of the environment variable that
//! holds it.
//!
//! # Example config
//!
//! ```json
//! {
//!   "symbol": "BINANCE:SOLUSDT",
//!   "output_path": "trade_prices.txt",
//!   "reconnect_delay_sec": 5,
//!   "sink_queue_size": 1024
//! }
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Top-level application config, deserialized from a JSON file.
///
/// All fields are optional; the `effective_*`-style accessors below apply
/// the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Instrument to subscribe to (e.g. `"BINANCE:SOLUSDT"`).
    pub symbol: Option<String>,

    /// WebSocket endpoint, without the token query parameter.
    pub feed_url: Option<String>,

    /// Path of the append-only output file.
    pub output_path: Option<String>,

    /// Seconds to wait after a failed reconnect attempt.
    pub reconnect_delay_sec: Option<u64>,

    /// Maximum reconnect attempts before giving up. Absent means retry
    /// forever.
    pub max_reconnect_attempts: Option<u32>,

    /// Capacity of the bounded sink hand-off queue.
    pub sink_queue_size: Option<usize>,

    /// Name of the environment variable holding the API token.
    pub token_env: Option<String>,
}

impl AppConfig {
    /// Returns the configured instrument, defaulting to `BINANCE:SOLUSDT`.
    pub fn symbol(&self) -> &str {
        self.symbol.as_deref().unwrap_or("BINANCE:SOLUSDT")
    }

    /// Returns the feed endpoint, defaulting to the Finnhub stream URL.
    pub fn feed_url(&self) -> &str {
        self.feed_url.as_deref().unwrap_or("wss://ws.finnhub.io")
    }

    /// Returns the output file path, defaulting to `trade_prices.txt`.
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(self.output_path.as_deref().unwrap_or("trade_prices.txt"))
    }

    /// Returns the delay between failed reconnect attempts (default: 5s).
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_sec.unwrap_or(5))
    }

    /// Returns the sink queue capacity (default: 1024).
    pub fn sink_queue_size(&self) -> usize {
        self.sink_queue_size.unwrap_or(1024)
    }

    /// Returns the name of the env var holding the API token.
    pub fn token_env(&self) -> &str {
        self.token_env.as_deref().unwrap_or("FINNHUB_API_TOKEN")
    }
}

/// Load and parse a JSON config file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_on_empty_config() {
        let cfg: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.symbol(), "BINANCE:SOLUSDT");
        assert_eq!(cfg.feed_url(), "wss://ws.finnhub.io");
        assert_eq!(cfg.output_path(), PathBuf::from("trade_prices.txt"));
        assert_eq!(cfg.reconnect_delay(), Duration::from_secs(5));
        assert_eq!(cfg.max_reconnect_attempts, None);
        assert_eq!(cfg.sink_queue_size(), 1024);
        assert_eq!(cfg.token_env(), "FINNHUB_API_TOKEN");
    }

    #[test]
    fn explicit_values_override_defaults() {
        let cfg: AppConfig = serde_json::from_str(
            r#"{
                "symbol": "BINANCE:BTCUSDT",
                "reconnect_delay_sec": 2,
                "max_reconnect_attempts": 10,
                "sink_queue_size": 64,
                "token_env": "MY_TOKEN"
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.symbol(), "BINANCE:BTCUSDT");
        assert_eq!(cfg.reconnect_delay(), Duration::from_secs(2));
        assert_eq!(cfg.max_reconnect_attempts, Some(10));
        assert_eq!(cfg.sink_queue_size(), 64);
        assert_eq!(cfg.token_env(), "MY_TOKEN");
    }
}
