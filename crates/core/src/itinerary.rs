// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core itinerary types.
//!
//! An [`Itinerary`] is the authoritative plan pushed by the replan server. It is
//! always replaced wholesale; nothing in this crate mutates one in place.
//!
//! Stops and legs are positionally correlated: leg *i* is the trip that reaches
//! stop *i*. The first stop is usually the starting point and has no leg.

use serde::{Deserialize, Serialize};

wire_enum! {
    /// How a leg is travelled.
    TransportMode, "transport mode" {
        Walking => "WALKING",
        Transit => "TRANSIT",
        Ebike => "EBIKE",
        Rideshare => "RIDESHARE",
    }
}

wire_enum! {
    /// Whether a stop may be dropped during a replan.
    StopPriority, "stop priority" {
        /// Never dropped by the replan engine.
        MustVisit => "MUST_VISIT",
        /// First candidate for dropping when budget or deadline is at risk.
        NiceToHave => "NICE_TO_HAVE",
    }
}

wire_enum! {
    /// Progress of a single stop.
    StopStatus, "stop status" {
        Pending => "PENDING",
        Completed => "COMPLETED",
        Dropped => "DROPPED",
    }
}

wire_enum! {
    /// Lifecycle of the whole itinerary.
    ItineraryStatus, "itinerary status" {
        Active => "ACTIVE",
        Replanning => "REPLANNING",
        Completed => "COMPLETED",
    }
}

wire_enum! {
    /// Friction classification assigned to a leg by the server's model.
    FrictionLevel, "friction level" {
        Low => "LOW",
        Medium => "MEDIUM",
        High => "HIGH",
    }
}

/// Constraints the traveller supplied at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConstraints {
    /// Total budget in cents.
    pub budget_cents: i64,
    /// ISO 8601 time by which the traveller must be back.
    pub return_deadline: String,
    /// Transport modes the traveller is willing to use.
    #[serde(default)]
    pub preferred_modes: Vec<TransportMode>,
}

/// A destination on the itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub priority: StopPriority,
    pub status: StopStatus,
    /// Human-readable reason, set when the server drops the stop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop_reason: Option<String>,
}

impl Stop {
    /// Creates a pending stop.
    pub fn new(id: impl Into<String>, name: impl Into<String>, priority: StopPriority) -> Self {
        Stop {
            id: id.into(),
            name: name.into(),
            lat: 0.0,
            lng: 0.0,
            priority,
            status: StopStatus::Pending,
            drop_reason: None,
        }
    }

    /// Returns true if the replan engine removed this stop.
    pub fn is_dropped(&self) -> bool {
        self.status == StopStatus::Dropped
    }
}

/// A transition between two stops.
///
/// Legs have no id of their own; they are identified by their endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub from_stop_id: String,
    pub to_stop_id: String,
    pub mode: TransportMode,
    pub cost_cents: i64,
    pub duration_sec: i64,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polyline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friction_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friction_level: Option<FrictionLevel>,
}

impl Leg {
    /// Creates an available leg with no friction data.
    pub fn new(
        from_stop_id: impl Into<String>,
        to_stop_id: impl Into<String>,
        mode: TransportMode,
        cost_cents: i64,
        duration_sec: i64,
    ) -> Self {
        Leg {
            from_stop_id: from_stop_id.into(),
            to_stop_id: to_stop_id.into(),
            mode,
            cost_cents,
            duration_sec,
            available: true,
            polyline: None,
            friction_score: None,
            friction_level: None,
        }
    }

    /// The `(from, to)` pair used to match legs across itinerary versions.
    pub fn endpoints(&self) -> (&str, &str) {
        (&self.from_stop_id, &self.to_stop_id)
    }
}

/// The authoritative travel plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub id: String,
    /// Incremented by the server on every replan.
    pub version: u64,
    pub user: UserConstraints,
    pub stops: Vec<Stop>,
    pub legs: Vec<Leg>,
    /// Sum of leg costs in cents.
    pub total_cost: i64,
    /// ISO 8601 projected arrival time.
    #[serde(rename = "projectedETA")]
    pub projected_eta: String,
    pub status: ItineraryStatus,
}

impl Itinerary {
    /// Returns the leg that reaches the stop at `stop_index`.
    ///
    /// When there is one leg fewer than stops, the first stop is the origin and
    /// leg *i - 1* reaches stop *i*.
    pub fn leg_into(&self, stop_index: usize) -> Option<&Leg> {
        let offset = self.stops.len().saturating_sub(self.legs.len());
        stop_index
            .checked_sub(offset)
            .and_then(|leg_index| self.legs.get(leg_index))
    }

    /// Stops the server has dropped from the plan.
    pub fn dropped_stops(&self) -> impl Iterator<Item = &Stop> {
        self.stops.iter().filter(|s| s.is_dropped())
    }

    /// Stops still to be visited.
    pub fn pending_stops(&self) -> impl Iterator<Item = &Stop> {
        self.stops
            .iter()
            .filter(|s| s.status == StopStatus::Pending)
    }

    /// Budget left after the planned legs. Negative when over budget.
    pub fn remaining_budget(&self) -> i64 {
        self.user.budget_cents - self.total_cost
    }
}

#[cfg(test)]
#[path = "itinerary_tests.rs"]
mod tests;
