// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Replay queue for itinerary updates received while the channel is down.
//!
//! Buffered updates live in memory only. On reconnect they are forwarded to
//! the sink in arrival order, before any later live update.

use std::collections::VecDeque;

use tracing::debug;

use dt_core::ItineraryUpdated;

/// Where replayed and live updates end up.
pub trait UpdateSink: Send + Sync {
    fn apply(&self, update: ItineraryUpdated);
}

/// What `offer` did with an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offered {
    Applied,
    Buffered,
}

/// FIFO buffer gated by a logical "channel ready" flag.
pub struct ReplayQueue<S> {
    sink: S,
    buffer: VecDeque<ItineraryUpdated>,
    ready: bool,
}

impl<S: UpdateSink> ReplayQueue<S> {
    /// Create a closed queue forwarding to `sink`.
    pub fn new(sink: S) -> Self {
        ReplayQueue {
            sink,
            buffer: VecDeque::new(),
            ready: false,
        }
    }

    /// Forward the update if the channel is ready, otherwise buffer it.
    pub fn offer(&mut self, update: ItineraryUpdated) -> Offered {
        if self.ready {
            self.sink.apply(update);
            Offered::Applied
        } else {
            debug!(
                version = update.itinerary.version,
                buffered = self.buffer.len() + 1,
                "channel not ready, buffering update"
            );
            self.buffer.push_back(update);
            Offered::Buffered
        }
    }

    /// Mark the channel ready and replay everything buffered, oldest first.
    ///
    /// Returns the number of updates replayed.
    pub fn drain_on_reconnect(&mut self) -> usize {
        self.ready = true;
        let mut replayed = 0;
        while let Some(update) = self.buffer.pop_front() {
            self.sink.apply(update);
            replayed += 1;
        }
        replayed
    }

    /// Mark the channel not ready. Buffered updates are kept.
    pub fn close(&mut self) {
        self.ready = false;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
