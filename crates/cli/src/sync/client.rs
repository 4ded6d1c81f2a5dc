// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync client: wires the connection task to the itinerary store.
//!
//! - `EventDispatcher` turns each connection event into store transitions
//! - `SyncClient` spawns the connection task and the dispatcher loop
//! - `SyncHandle` is what the rendering layer keeps to join and shut down

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use dt_core::{DisruptionAcknowledged, DisruptionError, ItineraryUpdated, ServerMessage};

use super::connection::{
    ConnectionConfig, ConnectionEvent, ConnectionManager, SharedConnectionState,
};
use super::queue::{Offered, ReplayQueue};
use super::transport::{Transport, WebSocketTransport};
use crate::store::ItineraryStore;

/// Configuration for the sync client.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Event channel endpoint.
    pub url: String,
    /// Fixed delay between reconnection attempts.
    pub reconnect_delay: Duration,
    /// Session to join on startup.
    pub session_id: Option<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            url: "ws://localhost:8000/ws".to_string(),
            reconnect_delay: Duration::from_millis(1000),
            session_id: None,
        }
    }
}

/// Error type for sync client operations.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("invalid sync url '{0}': expected ws:// or wss://")]
    InvalidUrl(String),

    #[error("sync client must be started inside a tokio runtime")]
    NoRuntime,
}

/// Result type for sync client operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Applies connection events to the store, one at a time.
pub struct EventDispatcher {
    store: ItineraryStore,
    queue: ReplayQueue<ItineraryStore>,
    runs_observed: Arc<AtomicU64>,
    /// When the last acknowledged disruption started a replan.
    replan_started: Option<Instant>,
}

impl EventDispatcher {
    pub fn new(store: ItineraryStore) -> Self {
        EventDispatcher {
            queue: ReplayQueue::new(store.clone()),
            store,
            runs_observed: Arc::new(AtomicU64::new(0)),
            replan_started: None,
        }
    }

    /// Replans seen so far, including ones still buffered.
    pub fn runs_observed(&self) -> u64 {
        self.runs_observed.load(Ordering::Relaxed)
    }

    /// Updates waiting for the channel to come back.
    pub fn buffered(&self) -> usize {
        self.queue.len()
    }

    pub fn handle(&mut self, event: ConnectionEvent) {
        match event {
            ConnectionEvent::Connected => self.on_connected(),
            ConnectionEvent::Disconnected { reason } => {
                debug!(%reason, "channel lost");
                self.on_disconnected();
            }
            ConnectionEvent::Message(msg) => self.dispatch(msg),
        }
    }

    pub fn dispatch(&mut self, msg: ServerMessage) {
        match msg {
            ServerMessage::DisruptionAcknowledged(ack) => self.on_disruption_acknowledged(ack),
            ServerMessage::ItineraryUpdated(update) => self.on_itinerary_updated(update),
            ServerMessage::DisruptionError(err) => self.on_disruption_error(err),
        }
    }

    pub fn on_connected(&mut self) {
        self.store.set_connected(true);
        let replayed = self.queue.drain_on_reconnect();
        if replayed > 0 {
            info!(replayed, "replayed buffered updates");
        }
    }

    /// Marks the channel down. The itinerary itself is left as it is.
    pub fn on_disconnected(&mut self) {
        self.store.set_connected(false);
        self.queue.close();
    }

    pub fn on_disruption_acknowledged(&mut self, ack: DisruptionAcknowledged) {
        self.replan_started = Some(Instant::now());
        let event = ack.into_event(Utc::now());
        info!(
            id = %event.id,
            kind = %event.kind,
            severity = %event.severity,
            "disruption acknowledged, replanning"
        );
        self.store.set_replanning(true);
        self.store.record_disruption(event);
    }

    pub fn on_itinerary_updated(&mut self, update: ItineraryUpdated) {
        if let (Some(theirs), Some(ours)) = (update.session_id.as_deref(), self.store.session_id())
        {
            if theirs != ours {
                debug!(session = theirs, "ignoring update for another session");
                return;
            }
        }

        if !update.is_undo() {
            let runs = self.runs_observed.fetch_add(1, Ordering::Relaxed) + 1;
            match self.replan_started.take() {
                Some(started) => info!(
                    version = update.itinerary.version,
                    runs,
                    latency_ms = started.elapsed().as_millis() as u64,
                    "replan received"
                ),
                None => info!(version = update.itinerary.version, runs, "replan received"),
            }
        }

        if self.queue.offer(update) == Offered::Buffered {
            debug!(buffered = self.queue.len(), "update held until reconnect");
        }
    }

    pub fn on_disruption_error(&mut self, err: DisruptionError) {
        warn!(error = %err.error, "server failed to replan");
        self.replan_started = None;
        self.store.set_replanning(false);
    }
}

/// Builds and starts the sync machinery.
pub struct SyncClient {
    config: SyncConfig,
    store: ItineraryStore,
}

impl SyncClient {
    pub fn new(config: SyncConfig, store: ItineraryStore) -> Self {
        SyncClient { config, store }
    }

    /// Start over a real WebSocket.
    pub fn start(self) -> SyncResult<SyncHandle> {
        self.start_with_transport(WebSocketTransport::new)
    }

    /// Start with a custom transport factory (for testing).
    pub fn start_with_transport<T, F>(self, make_transport: F) -> SyncResult<SyncHandle>
    where
        T: Transport + 'static,
        F: Fn() -> T + Send + 'static,
    {
        let url = &self.config.url;
        if !(url.starts_with("ws://") || url.starts_with("wss://")) {
            return Err(SyncError::InvalidUrl(url.clone()));
        }
        let runtime = Handle::try_current().map_err(|_| SyncError::NoRuntime)?;
        let _guard = runtime.enter();

        if let Some(session_id) = self.config.session_id {
            self.store.set_session_id(Some(session_id));
        }

        let (manager, events) = ConnectionManager::spawn(
            ConnectionConfig {
                url: self.config.url,
                reconnect_delay: self.config.reconnect_delay,
            },
            self.store.clone(),
            make_transport,
        );

        let dispatcher = EventDispatcher::new(self.store.clone());
        let runs_observed = Arc::clone(&dispatcher.runs_observed);
        let cancel_token = manager.cancel_token();
        let dispatch_task = tokio::spawn(run_dispatcher(dispatcher, events, cancel_token.clone()));

        Ok(SyncHandle {
            store: self.store,
            manager,
            dispatch_task,
            runs_observed,
        })
    }
}

async fn run_dispatcher(
    mut dispatcher: EventDispatcher,
    mut events: mpsc::Receiver<ConnectionEvent>,
    cancel_token: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            _ = cancel_token.cancelled() => break,
            event = events.recv() => match event {
                Some(event) => dispatcher.handle(event),
                None => break,
            },
        }
    }
    if dispatcher.buffered() > 0 {
        debug!(dropped = dispatcher.buffered(), "discarding buffered updates");
    }
}

/// A running sync client.
pub struct SyncHandle {
    store: ItineraryStore,
    manager: ConnectionManager,
    dispatch_task: JoinHandle<()>,
    runs_observed: Arc<AtomicU64>,
}

impl SyncHandle {
    pub fn store(&self) -> &ItineraryStore {
        &self.store
    }

    pub fn connection(&self) -> &SharedConnectionState {
        self.manager.state()
    }

    pub fn runs_observed(&self) -> u64 {
        self.runs_observed.load(Ordering::Relaxed)
    }

    /// Switch to `session_id`, announcing it now if the channel is up and on
    /// every later reconnect. Never waits on the connection task.
    pub fn join_session(&self, session_id: impl Into<String>) {
        let session_id = session_id.into();
        info!(%session_id, "joining session");
        self.store.set_session_id(Some(session_id.clone()));
        self.manager.join_session(session_id);
    }

    /// Stop the connection task and the dispatcher, then dispose the store's
    /// deadlines.
    pub async fn shutdown(self) {
        self.manager.shutdown().await;
        if let Err(e) = self.dispatch_task.await {
            warn!(error = %e, "dispatcher ended abnormally");
        }
        self.store.set_connected(false);
        self.store.dispose();
        info!("sync client stopped");
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
