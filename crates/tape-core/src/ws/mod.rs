//! WebSocket client with auto-reconnect and lifecycle state tracking.

pub mod client;
pub mod state;

pub use client::{OnMessageCallback, WsConnConfig, WsConnection};
pub use state::{ConnState, Lifecycle};
