// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Background connection management for the event channel.
//!
//! A single task owns the transport. It connects, re-announces the session,
//! forwards inbound frames, and reconnects after a fixed delay for as long as
//! the manager lives. Consumers see only `ConnectionEvent`s.

use std::sync::atomic::{AtomicU32, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use dt_core::{ClientMessage, ServerMessage};

use super::transport::{Transport, TransportError};
use crate::store::ItineraryStore;

/// Connection state values for atomic state field.
pub const STATE_DISCONNECTED: u8 = 0;
pub const STATE_CONNECTING: u8 = 1;
pub const STATE_CONNECTED: u8 = 2;

/// Connection state visible to both the background task and its callers.
///
/// Uses atomic fields for lock-free status reads.
pub struct SharedConnectionState {
    state: AtomicU8,
    /// Connection attempt count (for status reporting).
    attempt: AtomicU32,
}

impl SharedConnectionState {
    /// Create a new shared state initialized to disconnected.
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(STATE_DISCONNECTED),
            attempt: AtomicU32::new(0),
        }
    }

    pub fn get(&self) -> u8 {
        self.state.load(Ordering::Acquire)
    }

    pub fn set(&self, state: u8) {
        self.state.store(state, Ordering::Release);
    }

    pub fn attempt(&self) -> u32 {
        self.attempt.load(Ordering::Acquire)
    }

    pub fn set_attempt(&self, attempt: u32) {
        self.attempt.store(attempt, Ordering::Release);
    }

    pub fn is_connected(&self) -> bool {
        self.get() == STATE_CONNECTED
    }

    pub fn is_connecting(&self) -> bool {
        self.get() == STATE_CONNECTING
    }

    /// One-line state for the `status` command.
    pub fn status_string(&self) -> String {
        if self.is_connected() {
            return "connected".to_string();
        }
        if !self.is_connecting() {
            return "disconnected".to_string();
        }
        match self.attempt() {
            0 => "connecting".to_string(),
            attempt => format!("connecting (attempt {attempt})"),
        }
    }
}

impl Default for SharedConnectionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Events sent from the connection task to its consumer.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionEvent {
    /// The channel is up and the session, if any, has been announced.
    Connected,
    /// An inbound event frame, in receipt order.
    Message(ServerMessage),
    /// A live channel went down. Reconnection is already scheduled.
    Disconnected { reason: String },
}

/// Commands sent to the connection task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionCommand {
    /// Announce this session on the live channel, if there is one.
    Join(String),
}

/// Configuration for the connection manager.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// URL to connect to.
    pub url: String,
    /// Fixed delay between reconnection attempts.
    pub reconnect_delay: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            url: "ws://localhost:8000/ws".to_string(),
            reconnect_delay: Duration::from_millis(1000),
        }
    }
}

/// Manages the background connection task.
///
/// The task starts on `spawn` and retries without limit until `shutdown`.
pub struct ConnectionManager {
    shared_state: Arc<SharedConnectionState>,
    command_tx: mpsc::Sender<ConnectionCommand>,
    cancel_token: CancellationToken,
    task: JoinHandle<()>,
}

impl ConnectionManager {
    /// Start the connection task.
    ///
    /// `make_transport` builds a fresh transport for every attempt. The
    /// session to announce is read from `store` at each connect.
    ///
    /// Returns the manager and a receiver for connection events.
    pub fn spawn<T, F>(
        config: ConnectionConfig,
        store: ItineraryStore,
        make_transport: F,
    ) -> (Self, mpsc::Receiver<ConnectionEvent>)
    where
        T: Transport + 'static,
        F: Fn() -> T + Send + 'static,
    {
        let (event_tx, event_rx) = mpsc::channel(64);
        let (command_tx, command_rx) = mpsc::channel(8);
        let cancel_token = CancellationToken::new();
        let shared_state = Arc::new(SharedConnectionState::new());

        let task = tokio::spawn(run_connection(
            ConnectionTask {
                config,
                store,
                shared_state: Arc::clone(&shared_state),
                event_tx,
                command_rx,
                cancel_token: cancel_token.clone(),
                announced: None,
            },
            make_transport,
        ));

        let manager = Self {
            shared_state,
            command_tx,
            cancel_token,
            task,
        };
        (manager, event_rx)
    }

    pub fn state(&self) -> &Arc<SharedConnectionState> {
        &self.shared_state
    }

    /// Get a cancellation token for this manager.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Ask the task to announce `session_id` on the live channel.
    ///
    /// Never waits. While the channel is down the request only matters until
    /// the next connect, which announces whatever the store holds, so callers
    /// set the store's session id first and a full queue drops the request.
    pub fn join_session(&self, session_id: String) {
        match self.command_tx.try_send(ConnectionCommand::Join(session_id)) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                debug!("join already pending, next connect announces the store's session");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                debug!("connection task gone, join not sent");
            }
        }
    }

    /// Cancel the task and wait for it to close the transport.
    pub async fn shutdown(self) {
        self.cancel_token.cancel();
        if let Err(e) = self.task.await {
            warn!(error = %e, "connection task ended abnormally");
        }
    }
}

struct ConnectionTask {
    config: ConnectionConfig,
    store: ItineraryStore,
    shared_state: Arc<SharedConnectionState>,
    event_tx: mpsc::Sender<ConnectionEvent>,
    command_rx: mpsc::Receiver<ConnectionCommand>,
    cancel_token: CancellationToken,
    /// Session announced on the current link.
    announced: Option<String>,
}

/// Why a live session ended.
enum SessionEnd {
    Cancelled,
    ConsumerGone,
    Closed(String),
}

/// One step of a live session.
enum Step {
    Cancelled,
    Command(Option<ConnectionCommand>),
    Frame(Result<Option<ServerMessage>, TransportError>),
}

/// Connection loop with fixed-delay, unbounded reconnection.
async fn run_connection<T, F>(mut task: ConnectionTask, make_transport: F)
where
    T: Transport,
    F: Fn() -> T,
{
    let mut attempt = 0u32;

    loop {
        if task.cancel_token.is_cancelled() {
            break;
        }

        attempt = attempt.saturating_add(1);
        task.shared_state.set(STATE_CONNECTING);
        task.shared_state.set_attempt(attempt);

        // Create a new transport for each attempt
        let mut transport = make_transport();

        let connect_result = tokio::select! {
            _ = task.cancel_token.cancelled() => break,
            result = transport.connect(&task.config.url) => result,
        };

        match connect_result {
            Ok(()) => match task.announce_on_connect(&mut transport).await {
                Ok(()) => {
                    task.shared_state.set(STATE_CONNECTED);
                    task.shared_state.set_attempt(0);
                    info!(url = %task.config.url, attempt, "connected");
                    attempt = 0;

                    if task.event_tx.send(ConnectionEvent::Connected).await.is_err() {
                        break;
                    }

                    match run_session(&mut task, &mut transport).await {
                        SessionEnd::Cancelled => {
                            let _ = transport.disconnect().await;
                            break;
                        }
                        SessionEnd::ConsumerGone => break,
                        SessionEnd::Closed(reason) => {
                            task.shared_state.set(STATE_DISCONNECTED);
                            info!(%reason, "disconnected");
                            let event = ConnectionEvent::Disconnected { reason };
                            if task.event_tx.send(event).await.is_err() {
                                break;
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!(attempt, error = %e, "session announce failed");
                    let _ = transport.disconnect().await;
                }
            },
            Err(e) => {
                warn!(attempt, error = %e, "connection attempt failed");
            }
        }

        task.shared_state.set(STATE_DISCONNECTED);
        tokio::select! {
            _ = task.cancel_token.cancelled() => break,
            _ = tokio::time::sleep(task.config.reconnect_delay) => {}
        }
    }

    task.shared_state.set(STATE_DISCONNECTED);
    debug!("connection task stopped");
}

/// Pump frames and commands until the channel closes or the task is cancelled.
async fn run_session<T: Transport>(task: &mut ConnectionTask, transport: &mut T) -> SessionEnd {
    let mut commands_open = true;

    loop {
        let step = tokio::select! {
            biased;
            _ = task.cancel_token.cancelled() => Step::Cancelled,
            cmd = task.command_rx.recv(), if commands_open => Step::Command(cmd),
            frame = transport.recv() => Step::Frame(frame),
        };

        match step {
            Step::Cancelled => return SessionEnd::Cancelled,
            Step::Command(None) => commands_open = false,
            Step::Command(Some(ConnectionCommand::Join(session_id))) => {
                if task.announced.as_deref() == Some(session_id.as_str()) {
                    debug!(%session_id, "session already announced on this link");
                    continue;
                }
                if let Err(e) = announce(transport, Some(session_id.clone())).await {
                    return SessionEnd::Closed(e.to_string());
                }
                task.announced = Some(session_id);
            }
            Step::Frame(Ok(Some(msg))) => {
                debug!(event = msg.event_name(), "frame received");
                if task.event_tx.send(ConnectionEvent::Message(msg)).await.is_err() {
                    return SessionEnd::ConsumerGone;
                }
            }
            Step::Frame(Ok(None)) => return SessionEnd::Closed("closed by server".to_string()),
            Step::Frame(Err(e)) if e.is_recoverable() => {
                warn!(error = %e, "skipping undecodable frame");
            }
            Step::Frame(Err(e)) => return SessionEnd::Closed(e.to_string()),
        }
    }
}

impl ConnectionTask {
    /// Announce the store's session on a fresh link.
    ///
    /// Joins queued while the link was down are discarded first: the store
    /// already holds the latest session, so one announce covers them all.
    async fn announce_on_connect<T: Transport>(
        &mut self,
        transport: &mut T,
    ) -> Result<(), TransportError> {
        let mut stale = 0usize;
        while self.command_rx.try_recv().is_ok() {
            stale += 1;
        }
        if stale > 0 {
            debug!(stale, "discarded joins queued while disconnected");
        }

        self.announced = None;
        let session_id = self.store.session_id();
        announce(transport, session_id.clone()).await?;
        self.announced = session_id;
        Ok(())
    }
}

async fn announce<T: Transport>(
    transport: &mut T,
    session_id: Option<String>,
) -> Result<(), TransportError> {
    let Some(session_id) = session_id else {
        return Ok(());
    };
    debug!(%session_id, "announcing session");
    transport.send(ClientMessage::session_join(session_id)).await
}

#[cfg(test)]
#[path = "connection_tests.rs"]
mod tests;
