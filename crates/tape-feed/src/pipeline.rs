//! Feed-to-sink pipeline wiring.
//!
//! [`TapePipeline`] owns the WebSocket connection and the sink, and installs
//! the dispatcher callback between them: each inbound frame goes through the
//! filter exactly once, and each accepted record is handed to the sink
//! without blocking the frame-servicing task.

use std::path::PathBuf;
use std::sync::Arc;

use tape_core::error::Rejection;
use tape_core::ws::{ConnState, OnMessageCallback, WsConnConfig, WsConnection};
use tracing::{debug, info, warn};

use crate::finnhub::{FeedDef, json_parser};
use crate::sink::{SinkHandle, TradeSink};

/// The single feed-to-sink pipeline.
pub struct TapePipeline {
    def: FeedDef,
    output_path: PathBuf,
    queue_size: usize,
    conn: Option<WsConnection>,
    sink: Option<TradeSink>,
}

impl TapePipeline {
    /// Create a (not yet started) pipeline.
    pub fn new(def: FeedDef, output_path: PathBuf, queue_size: usize) -> Self {
        Self { def, output_path, queue_size, conn: None, sink: None }
    }

    /// Spawn the sink worker and the connection task.
    pub fn start(&mut self) {
        let sink = TradeSink::spawn(self.output_path.clone(), self.queue_size);
        let handle = sink.handle();
        let label = self.def.label.clone();
        let on_text: OnMessageCallback = Arc::new(move |text| handle_frame(&label, text, &handle));

        let mut conn = WsConnection::new(WsConnConfig {
            label: self.def.label.clone(),
            url: self.def.ws_url.clone(),
            subscribe_msg: Some(self.def.subscribe_msg.clone()),
            reconnect_delay: self.def.reconnect_delay,
            max_retries: self.def.max_retries,
        });
        conn.start(on_text);

        self.sink = Some(sink);
        self.conn = Some(conn);
        info!("[{}] pipeline started", self.def.label);
    }

    /// Snapshot of the connection lifecycle state.
    pub fn state(&self) -> ConnState {
        self.conn.as_ref().map(WsConnection::state).unwrap_or_default()
    }

    /// Stop the connection, then drain and close the sink.
    pub async fn stop(&mut self) {
        if let Some(mut conn) = self.conn.take() {
            // Joining the connection task drops the dispatcher callback and
            // with it the last producer-side sink handle.
            conn.stop().await;
        }
        if let Some(sink) = self.sink.take() {
            sink.close().await;
        }
        info!("[{}] pipeline stopped", self.def.label);
    }
}

/// Dispatch one inbound frame.
///
/// Exactly one filter invocation per frame; an accepted record is moved into
/// the sink hand-off, every rejection is logged and dropped.
pub fn handle_frame(label: &str, text: &str, sink: &SinkHandle) {
    match json_parser::parse_message(text) {
        Ok(update) => {
            debug!("[{label}] trade {} @ {}", update.symbol(), update.price);
            sink.store(update);
        }
        Err(Rejection::Ping) => debug!("[{label}] keepalive ping, ignoring"),
        Err(Rejection::UnhandledType(kind)) => info!("[{label}] unhandled message type: {kind}"),
        Err(rejection) => warn!("[{label}] frame rejected: {rejection}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn run_frames_through_sink(frames: &[&str]) -> String {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tape.txt");

        let sink = TradeSink::spawn(path.clone(), 16);
        let handle = sink.handle();
        for frame in frames {
            handle_frame("test", frame, &handle);
        }
        drop(handle);
        sink.close().await;

        std::fs::read_to_string(&path).unwrap_or_default()
    }

    #[test]
    fn unstarted_pipeline_reports_disconnected() {
        let def = crate::finnhub::FeedDef {
            label: "test".into(),
            ws_url: "wss://example.invalid".into(),
            subscribe_msg: String::new(),
            reconnect_delay: std::time::Duration::from_secs(5),
            max_retries: None,
        };
        let pipeline = TapePipeline::new(def, PathBuf::from("tape.txt"), 16);
        assert_eq!(pipeline.state(), ConnState::Disconnected);
    }

    #[tokio::test]
    async fn trade_frame_produces_one_line() {
        let out = run_frames_through_sink(&[r#"{"type":"trade","data":[{"s":"SOLUSDT","p":"21.50"}]}"#]).await;
        assert_eq!(out, "Last trade update: SOLUSDT price = 21.50\n");
    }

    #[tokio::test]
    async fn batched_frame_keeps_only_most_recent_entry() {
        let out = run_frames_through_sink(&[
            r#"{"type":"trade","data":[{"s":"SOLUSDT","p":1},{"s":"BTCUSDT","p":65000.1}]}"#,
        ])
        .await;
        assert_eq!(out, "Last trade update: BTCUSDT price = 65000.10\n");
    }

    #[tokio::test]
    async fn rejected_frames_produce_no_output() {
        let out = run_frames_through_sink(&[
            r#"{"type":"trade","data":[]}"#,
            r#"{"type":"ping"}"#,
            r#"{"type":"news","data":[{"s":"SOLUSDT","p":1}]}"#,
            "{not json",
        ])
        .await;
        assert_eq!(out, "");
    }

    #[tokio::test]
    async fn every_accepted_frame_is_eventually_persisted() {
        let out = run_frames_through_sink(&[
            r#"{"type":"trade","data":[{"s":"SOLUSDT","p":"21.50"}]}"#,
            r#"{"type":"ping"}"#,
            r#"{"type":"trade","data":[{"s":"SOLUSDT","p":"21.60"}]}"#,
            r#"{"type":"trade","data":[{"s":"SOLUSDT","p":"21.70"}]}"#,
        ])
        .await;
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.contains(&"Last trade update: SOLUSDT price = 21.50"));
        assert!(lines.contains(&"Last trade update: SOLUSDT price = 21.60"));
        assert!(lines.contains(&"Last trade update: SOLUSDT price = 21.70"));
    }
}
