//! Typed error definitions for the tape recorder.
//!
//! Provides [`TapeError`] for fatal or component-level failures and
//! [`Rejection`] for the per-message outcomes of the inbound filter. All
//! variants implement `std::error::Error` via `thiserror`, so they integrate
//! seamlessly with `anyhow::Result`.

use thiserror::Error;

/// Domain-specific errors for the tape recorder.
#[derive(Debug, Error)]
pub enum TapeError {
    /// Configuration or startup environment error. The only fatal kind:
    /// the runner aborts before any connection activity begins.
    #[error("config error: {0}")]
    Config(String),

    /// WebSocket connection, handshake, or communication error.
    #[error("websocket error: {0}")]
    WebSocket(String),

    /// Sink open or write error. One record is dropped, never retried.
    #[error("sink error: {0}")]
    Sink(String),
}

/// Why an inbound frame produced no trade record.
///
/// Every variant is non-fatal: the dispatcher logs it and keeps servicing
/// subsequent frames. [`Rejection::Ping`] and [`Rejection::UnhandledType`]
/// are deliberate no-op paths for frames the pipeline does not extract.
#[derive(Debug, Error)]
pub enum Rejection {
    /// The frame was not decodable JSON.
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The `type` field was absent or not a string.
    #[error("missing or non-string 'type' field")]
    MissingType,

    /// A keepalive ping frame.
    #[error("keepalive ping")]
    Ping,

    /// A recognized-as-JSON frame of a kind this pipeline does not handle.
    #[error("unhandled message type: {0}")]
    UnhandledType(String),

    /// A trade frame whose `data` array was absent or empty.
    #[error("empty or missing 'data' array")]
    EmptyData,

    /// The selected trade entry was missing its price or symbol field.
    #[error("missing or mistyped trade fields")]
    InvalidTradeFields,
}
