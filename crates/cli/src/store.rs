// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Itinerary state store.
//!
//! Single source of truth for the synchronized itinerary. Every operation
//! commits under one lock, so a reader never sees a half-applied transition.
//!
//! # Deadlines
//!
//! `apply_update` arms two deadlines:
//! - the undo window, after which the previous itinerary is discarded
//! - the diff display window, after which the diff is cleared
//!
//! Each new update cancels and re-arms both. Every deadline carries the
//! generation it was armed for, and an expiry whose generation is stale is a
//! no-op even if it raced past `abort()`.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use dt_core::{
    DisruptionEvent, DisruptionLog, Itinerary, ItineraryDiff, ItineraryUpdated, UpdateAction,
};

use crate::sync::UpdateSink;

/// Timing configuration for the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// How long an update can be rolled back.
    pub undo_window: Duration,
    /// How long a diff stays visible.
    pub diff_display: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            undo_window: Duration::from_secs(30),
            diff_display: Duration::from_secs(5),
        }
    }
}

/// A consistent copy of everything the rendering layer may read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreSnapshot {
    /// The current authoritative itinerary.
    pub itinerary: Option<Itinerary>,
    /// The itinerary replaced by the last update, while undo is possible.
    pub previous_itinerary: Option<Itinerary>,
    /// What the last update changed, while it is on display.
    pub diff: Option<ItineraryDiff>,
    /// The most recently acknowledged disruption.
    pub current_disruption: Option<DisruptionEvent>,
    pub disruption_log: DisruptionLog,
    pub session_id: Option<String>,
    pub connected: bool,
    /// A replan is in flight on the server.
    pub is_replanning: bool,
}

impl StoreSnapshot {
    /// Returns true while the undo window of the last update is open.
    pub fn can_undo(&self) -> bool {
        self.previous_itinerary.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeadlineKind {
    Undo,
    Diff,
}

/// A cancellable, generation-tagged timer slot.
#[derive(Default)]
struct Deadline {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl Deadline {
    /// Invalidates whatever is armed and returns the next generation.
    fn cancel(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.generation
    }

    fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
}

struct StoreState {
    view: StoreSnapshot,
    undo_deadline: Deadline,
    diff_deadline: Deadline,
    disposed: bool,
}

struct StoreInner {
    config: StoreConfig,
    state: Mutex<StoreState>,
    changes: watch::Sender<StoreSnapshot>,
}

/// Handle to the itinerary state store.
///
/// Cloning is cheap; all clones share the same state and deadlines.
#[derive(Clone)]
pub struct ItineraryStore {
    inner: Arc<StoreInner>,
}

impl Default for ItineraryStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl ItineraryStore {
    /// Creates an empty store.
    pub fn new(config: StoreConfig) -> Self {
        let (changes, _) = watch::channel(StoreSnapshot::default());
        ItineraryStore {
            inner: Arc::new(StoreInner {
                config,
                state: Mutex::new(StoreState {
                    view: StoreSnapshot::default(),
                    undo_deadline: Deadline::default(),
                    diff_deadline: Deadline::default(),
                    disposed: false,
                }),
                changes,
            }),
        }
    }

    pub fn config(&self) -> StoreConfig {
        self.inner.config
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.inner.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Runs `f` under the lock and publishes the result to subscribers.
    fn commit<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> R {
        let mut state = self.lock();
        let result = f(&mut state);
        self.inner.changes.send_replace(state.view.clone());
        result
    }

    // ─── Reads ─────────────────────────────────────────────────────────────

    /// Returns a consistent copy of the whole store.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.lock().view.clone()
    }

    /// Subscribes to committed transitions.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.inner.changes.subscribe()
    }

    pub fn itinerary(&self) -> Option<Itinerary> {
        self.lock().view.itinerary.clone()
    }

    pub fn previous_itinerary(&self) -> Option<Itinerary> {
        self.lock().view.previous_itinerary.clone()
    }

    pub fn diff(&self) -> Option<ItineraryDiff> {
        self.lock().view.diff.clone()
    }

    pub fn session_id(&self) -> Option<String> {
        self.lock().view.session_id.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.lock().view.connected
    }

    pub fn is_replanning(&self) -> bool {
        self.lock().view.is_replanning
    }

    pub fn can_undo(&self) -> bool {
        self.lock().view.can_undo()
    }

    // ─── Transitions ───────────────────────────────────────────────────────

    /// Installs an itinerary, discarding any undo snapshot and diff.
    ///
    /// For the initial itinerary and forced resets. Armed deadlines are left
    /// alone; once the snapshot and diff are gone their expiry changes nothing.
    pub fn set_itinerary(&self, itinerary: Itinerary) {
        self.commit(|state| {
            debug!(version = itinerary.version, "itinerary installed");
            state.view.itinerary = Some(itinerary);
            state.view.previous_itinerary = None;
            state.view.diff = None;
        });
    }

    /// Applies a replan: the current itinerary becomes the undo snapshot.
    ///
    /// Cancels and re-arms the undo and diff deadlines, so only the most
    /// recent update can be rolled back.
    pub fn apply_update(&self, itinerary: Itinerary, diff: ItineraryDiff) {
        self.apply_replan(itinerary, Some(diff));
    }

    /// Install a replanned itinerary. A missing diff is computed against the
    /// itinerary it replaces, inside the same commit.
    fn apply_replan(&self, itinerary: Itinerary, diff: Option<ItineraryDiff>) {
        self.commit(|state| {
            let diff = diff.unwrap_or_else(|| {
                state
                    .view
                    .itinerary
                    .as_ref()
                    .map(|current| ItineraryDiff::between(current, &itinerary))
                    .unwrap_or_default()
            });
            debug!(
                version = itinerary.version,
                cost_delta = diff.cost_delta,
                eta_delta = diff.eta_delta,
                "applying itinerary update"
            );
            state.view.previous_itinerary = state.view.itinerary.replace(itinerary);
            state.view.diff = Some(diff);
            state.view.is_replanning = false;

            let undo_generation = state.undo_deadline.cancel();
            let diff_generation = state.diff_deadline.cancel();
            if !state.disposed {
                state.undo_deadline.handle = self.arm(
                    DeadlineKind::Undo,
                    self.inner.config.undo_window,
                    undo_generation,
                );
                state.diff_deadline.handle = self.arm(
                    DeadlineKind::Diff,
                    self.inner.config.diff_display,
                    diff_generation,
                );
            }
        });
    }

    /// Rolls back the last update while its undo window is open.
    ///
    /// Returns false, leaving everything untouched, when there is nothing to
    /// roll back.
    pub fn undo(&self) -> bool {
        let mut state = self.lock();
        let Some(previous) = state.view.previous_itinerary.take() else {
            return false;
        };
        info!(version = previous.version, "rolled back to previous itinerary");
        state.view.itinerary = Some(previous);
        state.view.diff = None;
        state.undo_deadline.cancel();
        self.inner.changes.send_replace(state.view.clone());
        true
    }

    /// Hides the diff without touching the itinerary.
    pub fn clear_diff(&self) {
        self.commit(|state| {
            state.view.diff = None;
        });
    }

    /// Makes `event` the current disruption and prepends it to the log.
    pub fn record_disruption(&self, event: DisruptionEvent) {
        self.commit(|state| {
            state.view.disruption_log.record(event.clone());
            state.view.current_disruption = Some(event);
        });
    }

    pub fn set_session_id(&self, session_id: Option<String>) {
        self.commit(|state| state.view.session_id = session_id);
    }

    pub fn set_connected(&self, connected: bool) {
        self.commit(|state| state.view.connected = connected);
    }

    pub fn set_replanning(&self, replanning: bool) {
        self.commit(|state| state.view.is_replanning = replanning);
    }

    /// Installs a server-confirmed rollback and ends the in-flight replan.
    fn replace_from_server(&self, itinerary: Itinerary) {
        self.commit(|state| {
            debug!(version = itinerary.version, "server rollback installed");
            state.view.itinerary = Some(itinerary);
            state.view.previous_itinerary = None;
            state.view.diff = None;
            state.view.is_replanning = false;
        });
    }

    /// Cancels all live deadlines. No deadline fires after this returns.
    pub fn dispose(&self) {
        let mut state = self.lock();
        state.disposed = true;
        state.undo_deadline.cancel();
        state.diff_deadline.cancel();
    }

    /// Returns true if any deadline is still pending.
    pub fn has_pending_deadlines(&self) -> bool {
        let state = self.lock();
        state.undo_deadline.is_armed() || state.diff_deadline.is_armed()
    }

    // ─── Deadlines ─────────────────────────────────────────────────────────

    fn arm(&self, kind: DeadlineKind, after: Duration, generation: u64) -> Option<JoinHandle<()>> {
        let Ok(runtime) = Handle::try_current() else {
            warn!(?kind, "no async runtime, deadline not armed");
            return None;
        };
        let inner: Weak<StoreInner> = Arc::downgrade(&self.inner);
        Some(runtime.spawn(async move {
            tokio::time::sleep(after).await;
            if let Some(inner) = inner.upgrade() {
                ItineraryStore { inner }.expire(kind, generation);
            }
        }))
    }

    fn expire(&self, kind: DeadlineKind, generation: u64) {
        let mut state = self.lock();
        if state.disposed {
            return;
        }
        let changed = match kind {
            DeadlineKind::Undo => {
                if state.undo_deadline.generation != generation {
                    return;
                }
                state.undo_deadline.handle = None;
                state.view.previous_itinerary.take().is_some()
            }
            DeadlineKind::Diff => {
                if state.diff_deadline.generation != generation {
                    return;
                }
                state.diff_deadline.handle = None;
                state.view.diff.take().is_some()
            }
        };
        if changed {
            debug!(?kind, "deadline expired");
            self.inner.changes.send_replace(state.view.clone());
        }
    }
}

impl UpdateSink for ItineraryStore {
    fn apply(&self, update: ItineraryUpdated) {
        match update.action {
            UpdateAction::Undo => self.replace_from_server(update.itinerary),
            UpdateAction::Replan => self.apply_replan(update.itinerary, update.diff),
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
