// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Display-only description of what a replan changed.
//!
//! A diff lives for a short display window next to the itinerary it
//! describes. It never feeds back into state transitions.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::itinerary::{Itinerary, Leg, Stop};

/// What changed between two itinerary versions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItineraryDiff {
    /// Stops newly dropped by the replan.
    pub dropped_stops: Vec<Stop>,
    /// Legs whose endpoints did not exist before.
    pub new_legs: Vec<Leg>,
    /// Legs whose cost, duration or mode changed.
    pub changed_legs: Vec<Leg>,
    /// Total cost change in cents.
    pub cost_delta: i64,
    /// Projected arrival change in seconds.
    pub eta_delta: i64,
}

impl ItineraryDiff {
    /// Computes the diff from `old` to `new`.
    ///
    /// Legs are matched on their `(from, to)` endpoints. The ETA delta is zero
    /// when either projected arrival fails to parse.
    pub fn between(old: &Itinerary, new: &Itinerary) -> Self {
        let old_legs: HashMap<(&str, &str), &Leg> =
            old.legs.iter().map(|leg| (leg.endpoints(), leg)).collect();

        let mut new_legs = Vec::new();
        let mut changed_legs = Vec::new();
        for leg in &new.legs {
            match old_legs.get(&leg.endpoints()) {
                Some(prev) => {
                    if prev.cost_cents != leg.cost_cents
                        || prev.duration_sec != leg.duration_sec
                        || prev.mode != leg.mode
                    {
                        changed_legs.push(leg.clone());
                    }
                }
                None => new_legs.push(leg.clone()),
            }
        }

        let already_dropped: HashSet<&str> = old.dropped_stops().map(|s| s.id.as_str()).collect();
        let dropped_stops = new
            .dropped_stops()
            .filter(|s| !already_dropped.contains(s.id.as_str()))
            .cloned()
            .collect();

        let eta_delta = match (parse_eta(&old.projected_eta), parse_eta(&new.projected_eta)) {
            (Some(before), Some(after)) => (after - before).num_seconds(),
            _ => 0,
        };

        ItineraryDiff {
            dropped_stops,
            new_legs,
            changed_legs,
            cost_delta: new.total_cost - old.total_cost,
            eta_delta,
        }
    }

    /// Returns true if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.dropped_stops.is_empty()
            && self.new_legs.is_empty()
            && self.changed_legs.is_empty()
            && self.cost_delta == 0
            && self.eta_delta == 0
    }
}

fn parse_eta(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s).ok()
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
