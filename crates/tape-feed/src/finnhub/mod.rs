//! Finnhub trade feed — feed definition.
//!
//! Produces the single [`FeedDef`] describing the WebSocket stream: endpoint
//! URL with the auth token, the subscription message, and the reconnect
//! policy.

pub mod json_parser;

use std::time::Duration;

use anyhow::Result;
use tape_core::config::AppConfig;

/// Everything needed to set up the feed-to-sink pipeline.
pub struct FeedDef {
    /// Human-readable label (used in log lines instead of the token-bearing URL).
    pub label: String,
    /// Full WebSocket URL including the token query parameter.
    pub ws_url: String,
    /// Subscription message sent after each successful connect.
    pub subscribe_msg: String,
    /// Delay after a failed reconnect attempt.
    pub reconnect_delay: Duration,
    /// Cap on consecutive failed reconnect attempts. `None` retries forever.
    pub max_retries: Option<u32>,
}

/// Build the feed definition from the app config and the API credential.
pub fn build(config: &AppConfig, token: &str) -> Result<FeedDef> {
    Ok(FeedDef {
        label: "finnhub".into(),
        ws_url: build_feed_url(config.feed_url(), token)?,
        subscribe_msg: json_parser::build_subscribe(config.symbol()),
        reconnect_delay: config.reconnect_delay(),
        max_retries: config.max_reconnect_attempts,
    })
}

/// Append the auth token as a query parameter to the feed endpoint.
pub fn build_feed_url(base: &str, token: &str) -> Result<String> {
    let url = url::Url::parse_with_params(base, &[("token", token)])?;
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_url_carries_token() {
        let url = build_feed_url("wss://ws.finnhub.io", "sekrit").unwrap();
        assert_eq!(url, "wss://ws.finnhub.io/?token=sekrit");
    }

    #[test]
    fn build_uses_config_defaults() {
        let config = AppConfig::default();
        let def = build(&config, "tok").unwrap();
        assert_eq!(def.label, "finnhub");
        assert!(def.ws_url.ends_with("?token=tok"));
        assert!(def.subscribe_msg.contains("BINANCE:SOLUSDT"));
        assert_eq!(def.reconnect_delay, Duration::from_secs(5));
        assert_eq!(def.max_retries, None);
    }
}
