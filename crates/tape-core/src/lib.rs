//! # tape-core
//!
//! Core crate for the trade tape recorder, providing:
//!
//! - **Types** (`types`) — the normalized trade record and symbol utils
//! - **Configuration** (`config`) — JSON config deserialization
//! - **Error types** (`error`) — `TapeError` and filter `Rejection` via thiserror
//! - **WebSocket** (`ws`) — WS client with auto-reconnect + lifecycle states
//! - **Logging** (`logging`) — tracing-based structured logging

pub mod config;
pub mod error;
pub mod logging;
pub mod types;
pub mod ws;

// Re-export types at crate root for convenience.
pub use types::*;
