// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Live synchronization with the replanning server.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Connection  │────►│  Transport  │────►│   Replan    │
//! │  Manager    │◄────│   (trait)   │◄────│   Server    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │ ConnectionEvent
//!        ▼
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Event    │────►│   Replay    │────►│  Itinerary  │
//! │ Dispatcher  │     │   Queue     │     │   Store     │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Features
//!
//! - Session re-announced on every reconnect, before buffered updates replay
//! - Unbounded reconnection with a fixed delay
//! - Updates received while the channel is down replay in arrival order
//! - Injectable transport trait for testing

mod client;
mod connection;
mod queue;
mod transport;

pub use client::{EventDispatcher, SyncClient, SyncConfig, SyncError, SyncHandle, SyncResult};
pub use connection::{
    ConnectionCommand, ConnectionConfig, ConnectionEvent, ConnectionManager,
    SharedConnectionState, STATE_CONNECTED, STATE_CONNECTING, STATE_DISCONNECTED,
};
pub use queue::{Offered, ReplayQueue, UpdateSink};
pub use transport::{Transport, TransportError, TransportResult, WebSocketTransport};
