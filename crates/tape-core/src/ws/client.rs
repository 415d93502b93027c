//! Single WebSocket connection with auto-reconnect.
//!
//! Each `WsConnection` runs as a tokio task that:
//! 1. Connects to the feed endpoint (TLS, self-signed certificates accepted).
//! 2. Sends the subscription message once per established connection.
//! 3. Reads frames and forwards text payloads to a callback.
//! 4. Reconnects on closure or error: one immediate attempt, then a fixed
//!    delay after each failed attempt. Retries forever unless an attempt cap
//!    is configured.
//!
//! All lifecycle transitions go through [`Lifecycle`]; the current
//! [`ConnState`] is published on a watch channel for observers.

use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::watch;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

use super::state::{ConnState, Lifecycle};

/// Callback invoked for each received text frame.
pub type OnMessageCallback = Arc<dyn Fn(&str) + Send + Sync>;

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// Configuration for a single WebSocket connection.
#[derive(Debug, Clone)]
pub struct WsConnConfig {
    /// Human-readable label used in log lines (the URL carries a credential
    /// and is never logged).
    pub label: String,
    /// Full WebSocket URL including any auth query parameter.
    pub url: String,
    /// Message to send immediately after each successful handshake.
    pub subscribe_msg: Option<String>,
    /// Delay after a failed connect attempt before the next one.
    pub reconnect_delay: Duration,
    /// Cap on consecutive failed connect attempts. `None` retries forever.
    pub max_retries: Option<u32>,
}

/// A single WebSocket connection managed by a background tokio task.
pub struct WsConnection {
    /// Connection configuration.
    pub config: WsConnConfig,
    /// Shutdown signal sender.
    shutdown_tx: Option<watch::Sender<bool>>,
    /// Lifecycle state published by the connection task.
    state_rx: watch::Receiver<ConnState>,
    /// Task join handle.
    task: Option<tokio::task::JoinHandle<()>>,
}

impl WsConnection {
    /// Create a new (not yet started) connection.
    pub fn new(config: WsConnConfig) -> Self {
        let (_, state_rx) = watch::channel(ConnState::Disconnected);
        Self { config, shutdown_tx: None, state_rx, task: None }
    }

    /// Start the connection task. Text frames are forwarded to `on_text`.
    pub fn start(&mut self, on_text: OnMessageCallback) {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (state_tx, state_rx) = watch::channel(ConnState::Disconnected);
        let config = self.config.clone();

        let task = tokio::spawn(async move {
            connection_loop(config, on_text, state_tx, shutdown_rx).await;
        });

        self.shutdown_tx = Some(shutdown_tx);
        self.state_rx = state_rx;
        self.task = Some(task);
    }

    /// Read-only snapshot of the current lifecycle state.
    pub fn state(&self) -> ConnState {
        *self.state_rx.borrow()
    }

    /// Stop the connection and wait for the task to finish.
    pub async fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(true);
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

/// Main connection loop — connects, subscribes, reads, reconnects.
async fn connection_loop(
    config: WsConnConfig,
    on_text: OnMessageCallback,
    state_tx: watch::Sender<ConnState>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let label = config.label.clone();
    let mut lifecycle = Lifecycle::new();
    let mut failed_attempts = 0u32;

    loop {
        // Check shutdown before (re)connecting.
        if *shutdown_rx.borrow() {
            info!("[{label}] shutdown requested");
            lifecycle.shutdown();
            let _ = state_tx.send(lifecycle.state());
            return;
        }

        info!("[{label}] connecting");
        lifecycle.connect_started();
        let _ = state_tx.send(lifecycle.state());

        let ws_stream = match connect_ws(&config).await {
            Ok(s) => {
                failed_attempts = 0;
                lifecycle.established();
                let _ = state_tx.send(lifecycle.state());
                info!("[{label}] connected");
                s
            }
            Err(e) => {
                lifecycle.connection_lost();
                let _ = state_tx.send(lifecycle.state());
                failed_attempts += 1;
                if let Some(max) = config.max_retries {
                    if failed_attempts >= max {
                        error!("[{label}] connection failed: {e} — giving up after {failed_attempts} attempt(s)");
                        return;
                    }
                }
                error!(
                    "[{label}] connection failed: {e}, retrying in {:?}",
                    config.reconnect_delay
                );
                tokio::select! {
                    _ = tokio::time::sleep(config.reconnect_delay) => {},
                    _ = shutdown_rx.changed() => continue,
                }
                continue;
            }
        };

        let (mut ws_write, mut ws_read) = ws_stream.split();

        // Send the subscription message. Sent exactly once per established
        // connection; the message is idempotent on the server side.
        if let Some(ref sub_msg) = config.subscribe_msg {
            debug!("[{label}] subscribing: {sub_msg}");
            if let Err(e) = ws_write.send(Message::Text(sub_msg.clone().into())).await {
                error!("[{label}] subscribe send failed: {e}");
                lifecycle.connection_lost();
                let _ = state_tx.send(lifecycle.state());
                continue;
            }
        }

        // Frame-servicing loop. Events are dispatched synchronously, one at
        // a time, so state transitions never interleave.
        loop {
            tokio::select! {
                // Shutdown signal
                _ = shutdown_rx.changed() => {
                    info!("[{label}] shutdown signal received");
                    lifecycle.shutdown();
                    let _ = state_tx.send(lifecycle.state());
                    let _ = ws_write.close().await;
                    return;
                }

                // Incoming frame
                msg = ws_read.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            on_text(&text);
                        }
                        Some(Ok(Message::Ping(data))) => {
                            let _ = ws_write.send(Message::Pong(data)).await;
                        }
                        Some(Ok(Message::Close(_))) => {
                            warn!("[{label}] received close frame");
                            break;
                        }
                        Some(Err(e)) => {
                            error!("[{label}] read error: {e}");
                            break;
                        }
                        None => {
                            warn!("[{label}] stream ended");
                            break;
                        }
                        _ => {} // Binary, Pong, Frame — ignore
                    }
                }
            }
        }

        // Disconnected — reconnect immediately at the top of the outer loop;
        // only a failed connect attempt incurs the delay.
        lifecycle.connection_lost();
        let _ = state_tx.send(lifecycle.state());
        warn!("[{label}] disconnected, reconnecting");
    }
}

/// Establish a TLS WebSocket connection.
///
/// The connector accepts self-signed certificates; certificate trust is not
/// negotiated at runtime.
async fn connect_ws(config: &WsConnConfig) -> anyhow::Result<WsStream> {
    let tls = native_tls::TlsConnector::builder().danger_accept_invalid_certs(true).build()?;

    let (stream, _response) = tokio_tungstenite::connect_async_tls_with_config(
        config.url.as_str(),
        None,
        false,
        Some(tokio_tungstenite::Connector::NativeTls(tls)),
    )
    .await?;
    Ok(stream)
}
