//! # tape-feed
//!
//! The Finnhub feed module: inbound message filter, append-only sink, and
//! the pipeline glue between them and the WebSocket client.
//!
//! ## Architecture
//!
//! ```text
//! WsConnection ──frame──► handle_frame ──filter──► TradeUpdate
//!                              │                        │
//!                         log + drop                SinkHandle (bounded)
//!                         (rejections)                  │
//!                                                  writer worker ──► append-only file
//! ```
//!
//! - [`finnhub`] — feed definition + JSON message parser
//! - [`sink`] — bounded-queue append-only writer
//! - [`pipeline`] — connection/sink lifecycle + frame dispatcher
//! - [`json_util`] — string-or-number JSON parsing helpers

pub mod finnhub;
pub mod json_util;
pub mod pipeline;
pub mod sink;
