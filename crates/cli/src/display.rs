// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text rendering for the watch command.
//!
//! Everything here is a pure function of store snapshots; nothing reads the
//! store or the terminal.

use dt_core::{DisruptionEvent, Itinerary, ItineraryDiff, Leg, Stop, StopStatus};

use crate::colors::Palette;
use crate::store::StoreSnapshot;

/// Format cents as dollars, e.g. `$12.05` or `-$0.50`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}

/// Format a cost change with an explicit sign, e.g. `+$1.20`.
pub fn format_cost_delta(cents: i64) -> String {
    if cents > 0 {
        format!("+{}", format_cents(cents))
    } else {
        format_cents(cents)
    }
}

/// Format seconds as `1h 05m`, `12m` or `45s`.
pub fn format_duration(secs: i64) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    let abs = secs.unsigned_abs();
    if abs >= 3600 {
        format!("{sign}{}h {:02}m", abs / 3600, (abs % 3600) / 60)
    } else if abs >= 60 {
        format!("{sign}{}m", abs / 60)
    } else {
        format!("{sign}{abs}s")
    }
}

/// Format an ETA change with an explicit sign, e.g. `+12m`.
pub fn format_eta_delta(secs: i64) -> String {
    if secs > 0 {
        format!("+{}", format_duration(secs))
    } else {
        format_duration(secs)
    }
}

fn stop_marker(stop: &Stop) -> &'static str {
    match stop.status {
        StopStatus::Pending => "○",
        StopStatus::Completed => "●",
        StopStatus::Dropped => "✕",
    }
}

fn leg_summary(leg: &Leg) -> String {
    format!(
        "{} {} {}",
        leg.mode.as_str().to_ascii_lowercase(),
        format_cents(leg.cost_cents),
        format_duration(leg.duration_sec)
    )
}

/// Render an itinerary as a header, a budget line and one line per stop.
///
/// ```text
/// Itinerary demo-maya-001 v3 ACTIVE
///   cost $12.00 of $40.00 ($28.00 left), eta 2026-10-18T19:00:00Z
///   ○ Gallery  via transit $2.75 15m
///   ✕ Cafe  dropped: budget
/// ```
pub fn format_itinerary(itinerary: &Itinerary, palette: &Palette) -> Vec<String> {
    let mut lines = Vec::with_capacity(itinerary.stops.len() + 2);
    lines.push(format!(
        "{} {}",
        palette.header(&format!("Itinerary {}", itinerary.id)),
        palette.context(&format!("v{} {}", itinerary.version, itinerary.status))
    ));
    lines.push(format!(
        "  cost {} of {} ({} left), eta {}",
        palette.literal(&format_cents(itinerary.total_cost)),
        format_cents(itinerary.user.budget_cents),
        format_cents(itinerary.remaining_budget()),
        palette.literal(&itinerary.projected_eta)
    ));

    for (index, stop) in itinerary.stops.iter().enumerate() {
        let mut line = format!("  {} {}", stop_marker(stop), stop.name);
        if stop.is_dropped() {
            let reason = stop.drop_reason.as_deref().unwrap_or("replan");
            line.push_str(&palette.alert(&format!("  dropped: {reason}")));
        } else if let Some(leg) = itinerary.leg_into(index) {
            line.push_str(&palette.context(&format!("  via {}", leg_summary(leg))));
        }
        lines.push(line);
    }
    lines
}

/// Render what an update changed.
pub fn format_diff(diff: &ItineraryDiff, palette: &Palette) -> Vec<String> {
    if diff.is_empty() {
        return vec![palette.context("  no changes")];
    }

    let cost = format_cost_delta(diff.cost_delta);
    let cost = if diff.cost_delta > 0 {
        palette.alert(&cost)
    } else {
        palette.good(&cost)
    };
    let mut lines = vec![format!(
        "  cost {cost}, eta {}",
        format_eta_delta(diff.eta_delta)
    )];

    for stop in &diff.dropped_stops {
        lines.push(palette.alert(&format!("  - dropped {}", stop.name)));
    }
    for leg in &diff.new_legs {
        lines.push(format!(
            "  + {} -> {} by {}",
            leg.from_stop_id,
            leg.to_stop_id,
            leg_summary(leg)
        ));
    }
    for leg in &diff.changed_legs {
        lines.push(format!(
            "  ~ {} -> {} now {}",
            leg.from_stop_id,
            leg.to_stop_id,
            leg_summary(leg)
        ));
    }
    lines
}

/// One-line disruption summary, e.g. `[MAJOR] LINE_CANCELLATION evt-1a2b3c4d`.
pub fn format_disruption(event: &DisruptionEvent, palette: &Palette) -> String {
    let mut line = format!(
        "{} {} {}",
        palette.alert(&format!("[{}]", event.severity)),
        event.kind,
        palette.context(&event.id)
    );
    if let Some(summary) = &event.summary {
        line.push_str(&format!(": {summary}"));
    }
    if let Some(delay) = event.delay_minutes {
        line.push_str(&palette.context(&format!(" (+{delay} min)")));
    }
    line
}

/// Status line for the `status` command.
pub fn format_status(snapshot: &StoreSnapshot, connection: &str) -> String {
    let mut parts = vec![connection.to_string()];
    if let Some(session) = &snapshot.session_id {
        parts.push(format!("session {session}"));
    }
    match &snapshot.itinerary {
        Some(itinerary) => parts.push(format!(
            "itinerary v{} ({} stops left)",
            itinerary.version,
            itinerary.pending_stops().count()
        )),
        None => parts.push("no itinerary".to_string()),
    }
    if snapshot.can_undo() {
        parts.push("undo available".to_string());
    }
    if snapshot.is_replanning {
        parts.push("replanning".to_string());
    }
    if let Some(latest) = snapshot.disruption_log.latest() {
        parts.push(format!(
            "{} disruptions (latest {})",
            snapshot.disruption_log.len(),
            latest.id
        ));
    }
    format!("status: {}", parts.join(", "))
}

/// Lines describing everything that differs between two snapshots.
///
/// Returns nothing when the snapshots are equal.
pub fn describe_transition(
    before: &StoreSnapshot,
    after: &StoreSnapshot,
    palette: &Palette,
) -> Vec<String> {
    let mut lines = Vec::new();

    if before.connected != after.connected {
        lines.push(if after.connected {
            palette.good("connected")
        } else {
            palette.warn("disconnected, reconnecting")
        });
    }

    if before.session_id != after.session_id {
        if let Some(session) = &after.session_id {
            lines.push(format!("joined session {}", palette.literal(session)));
        }
    }

    let new_disruption = match (&before.current_disruption, &after.current_disruption) {
        (Some(old), Some(new)) => old.id != new.id,
        (None, Some(_)) => true,
        _ => false,
    };
    if let (true, Some(event)) = (new_disruption, &after.current_disruption) {
        lines.push(format!("disruption {}", format_disruption(event, palette)));
    }

    let itinerary_changed = before.itinerary != after.itinerary;
    if !before.is_replanning && after.is_replanning {
        lines.push(palette.warn("replanning..."));
    } else if before.is_replanning && !after.is_replanning && !itinerary_changed {
        lines.push(palette.warn("replan abandoned"));
    }

    if itinerary_changed {
        if let Some(itinerary) = &after.itinerary {
            let rolled_back = before.previous_itinerary.as_ref() == Some(itinerary);
            lines.push(if rolled_back {
                palette.warn(&format!("rolled back to v{}", itinerary.version))
            } else {
                format!("itinerary now v{}", itinerary.version)
            });
            lines.extend(format_itinerary(itinerary, palette));
        }
        if let Some(diff) = &after.diff {
            lines.extend(format_diff(diff, palette));
        }
        if after.can_undo() {
            lines.push(palette.context("  type 'undo' to roll back"));
        }
    } else {
        if before.diff.is_some() && after.diff.is_none() {
            lines.push(palette.context("diff cleared"));
        }
        if before.can_undo() && !after.can_undo() {
            lines.push(palette.context("undo window closed"));
        }
    }

    lines
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
