// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers.

use dt_core::{
    DisruptionEvent, DisruptionSource, DisruptionType, Itinerary, ItineraryDiff, ItineraryStatus,
    ItineraryUpdated, Leg, Severity, Stop, StopPriority, TransportMode, UserConstraints,
};

/// Create a two-stop itinerary whose version and cost are derived from `version`.
pub fn make_itinerary(version: u64) -> Itinerary {
    let cost = 100 * version as i64;
    Itinerary {
        id: "session-test".to_string(),
        version,
        user: UserConstraints {
            budget_cents: 5000,
            return_deadline: "2026-10-18T22:00:00Z".to_string(),
            preferred_modes: vec![TransportMode::Transit],
        },
        stops: vec![
            Stop::new("start", "Start", StopPriority::MustVisit),
            Stop::new("stop-1", "Gallery", StopPriority::MustVisit),
        ],
        legs: vec![Leg::new("start", "stop-1", TransportMode::Transit, cost, 900)],
        total_cost: cost,
        projected_eta: "2026-10-18T18:00:00Z".to_string(),
        status: ItineraryStatus::Active,
    }
}

/// Create a diff whose cost delta identifies it.
pub fn make_diff(cost_delta: i64) -> ItineraryDiff {
    ItineraryDiff {
        cost_delta,
        ..ItineraryDiff::default()
    }
}

/// Create a replan update for `make_itinerary(version)`.
pub fn make_replan(version: u64) -> ItineraryUpdated {
    ItineraryUpdated::replan(make_itinerary(version), make_diff(version as i64))
}

/// Create a disruption record with the given id.
pub fn make_disruption(id: &str) -> DisruptionEvent {
    DisruptionEvent {
        id: id.to_string(),
        kind: DisruptionType::LineCancellation,
        severity: Severity::Major,
        affected_routes: None,
        affected_modes: None,
        affected_stop_id: None,
        delay_minutes: None,
        summary: None,
        timestamp: "2026-10-18T12:00:00Z".to_string(),
        source: DisruptionSource::DemoInject,
    }
}
