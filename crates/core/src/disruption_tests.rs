// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;

fn event(id: &str) -> DisruptionEvent {
    DisruptionEvent {
        id: id.to_string(),
        kind: DisruptionType::TransitDelay,
        severity: Severity::Minor,
        affected_routes: None,
        affected_modes: Some(vec!["TRANSIT".to_string()]),
        affected_stop_id: None,
        delay_minutes: Some(12),
        summary: None,
        timestamp: "2026-10-18T12:00:00Z".to_string(),
        source: DisruptionSource::LiveApi,
    }
}

#[test]
fn log_is_most_recent_first() {
    let mut log = DisruptionLog::new();
    log.record(event("a"));
    log.record(event("b"));

    let ids: Vec<_> = log.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
    assert_eq!(log.latest().unwrap().id, "b");
}

#[test]
fn sixth_event_evicts_the_oldest() {
    let mut log = DisruptionLog::new();
    for id in ["1", "2", "3", "4", "5", "6"] {
        log.record(event(id));
        assert!(log.len() <= DISRUPTION_LOG_CAPACITY);
    }

    let ids: Vec<_> = log.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["6", "5", "4", "3", "2"]);
}

#[test]
fn event_wire_format() {
    let json = serde_json::to_value(event("evt-1")).unwrap();
    assert_eq!(json["type"], "TRANSIT_DELAY");
    assert_eq!(json["source"], "LIVE_API");
    assert_eq!(json["delayMinutes"], 12);
    assert!(json.get("affectedStopId").is_none());
}
