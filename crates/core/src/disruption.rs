// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! External perturbations that trigger a replan.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Number of disruptions kept in a [`DisruptionLog`].
pub const DISRUPTION_LOG_CAPACITY: usize = 5;

wire_enum! {
    /// What kind of perturbation happened.
    DisruptionType, "disruption type" {
        TransitDelay => "TRANSIT_DELAY",
        LineCancellation => "LINE_CANCELLATION",
        VenueClosed => "VENUE_CLOSED",
        Weather => "WEATHER",
    }
}

wire_enum! {
    /// How badly the plan is affected.
    Severity, "severity" {
        Minor => "MINOR",
        Major => "MAJOR",
        Critical => "CRITICAL",
    }
}

wire_enum! {
    /// Where a disruption came from.
    DisruptionSource, "disruption source" {
        /// Reported by a live transit feed.
        LiveApi => "LIVE_API",
        /// Injected from the demo control panel.
        DemoInject => "DEMO_INJECT",
    }
}

/// An immutable record of a disruption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisruptionEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DisruptionType,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_routes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_modes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_stop_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// ISO 8601 time the disruption was observed.
    pub timestamp: String,
    pub source: DisruptionSource,
}

/// Bounded, most-recent-first history of disruptions.
///
/// Holds at most [`DISRUPTION_LOG_CAPACITY`] entries; recording past capacity
/// evicts the oldest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisruptionLog {
    entries: VecDeque<DisruptionEvent>,
}

impl DisruptionLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends an event, evicting the oldest entry when full.
    pub fn record(&mut self, event: DisruptionEvent) {
        self.entries.push_front(event);
        self.entries.truncate(DISRUPTION_LOG_CAPACITY);
    }

    /// The most recent event, if any.
    pub fn latest(&self) -> Option<&DisruptionEvent> {
        self.entries.front()
    }

    /// Iterates newest first.
    pub fn iter(&self) -> impl Iterator<Item = &DisruptionEvent> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "disruption_tests.rs"]
mod tests;
