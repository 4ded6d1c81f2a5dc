// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Event-channel protocol messages for client-server communication.
//!
//! Every frame is a JSON object `{"event": <name>, "data": <payload>}`:
//! - Server pushes disruption acknowledgements and itinerary updates
//! - Client announces its session after every (re)connect
//!
//! Frames are bare WebSocket text messages, not Socket.IO packets.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::diff::ItineraryDiff;
use crate::disruption::{DisruptionEvent, DisruptionSource, DisruptionType, Severity};
use crate::itinerary::Itinerary;

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data")]
pub enum ClientMessage {
    /// Bind this connection to a session so the server routes its events here.
    ///
    /// Re-sent on every reconnect.
    #[serde(rename = "session:join")]
    SessionJoin {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data")]
pub enum ServerMessage {
    /// The server received a disruption and started replanning.
    #[serde(rename = "disruption:acknowledged")]
    DisruptionAcknowledged(DisruptionAcknowledged),

    /// A new plan, either from a replan or a confirmed rollback.
    #[serde(rename = "itinerary:updated")]
    ItineraryUpdated(ItineraryUpdated),

    /// The replan for the last disruption failed.
    #[serde(rename = "disruption:error")]
    DisruptionError(DisruptionError),
}

/// Payload of `disruption:acknowledged`.
///
/// Every field is optional on the wire. Enum fields are kept as raw strings so
/// an unrecognised value falls back to its default instead of rejecting the
/// whole event.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DisruptionAcknowledged {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_routes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_modes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_stop_id: Option<String>,
}

impl DisruptionAcknowledged {
    /// Builds the disruption record, defaulting whatever the server left out.
    ///
    /// Defaults: type `LINE_CANCELLATION`, severity `MAJOR`, timestamp `now`,
    /// source `DEMO_INJECT`, and a generated `evt-xxxxxxxx` id.
    pub fn into_event(self, now: DateTime<Utc>) -> DisruptionEvent {
        DisruptionEvent {
            id: self.id.unwrap_or_else(generate_event_id),
            kind: parse_or(self.kind, DisruptionType::LineCancellation),
            severity: parse_or(self.severity, Severity::Major),
            affected_routes: self.affected_routes,
            affected_modes: self.affected_modes,
            affected_stop_id: self.affected_stop_id,
            delay_minutes: self.delay_minutes,
            summary: self.summary,
            timestamp: self
                .timestamp
                .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true)),
            source: parse_or(self.source, DisruptionSource::DemoInject),
        }
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, fallback: T) -> T {
    raw.and_then(|s| s.parse().ok()).unwrap_or(fallback)
}

fn generate_event_id() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("evt-{}", &hex[..8])
}

/// What an `itinerary:updated` event asks the client to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateAction {
    /// The server rolled back; install the itinerary directly.
    Undo,
    /// A new plan with a diff to display. Any action other than `undo`.
    #[default]
    #[serde(other)]
    Replan,
}

/// Payload of `itinerary:updated`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItineraryUpdated {
    pub itinerary: Itinerary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<ItineraryDiff>,
    #[serde(default)]
    pub action: UpdateAction,
    /// Session the update belongs to, when the server broadcasts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl ItineraryUpdated {
    /// A replan update carrying a diff.
    pub fn replan(itinerary: Itinerary, diff: ItineraryDiff) -> Self {
        ItineraryUpdated {
            itinerary,
            diff: Some(diff),
            action: UpdateAction::Replan,
            session_id: None,
        }
    }

    /// A confirmed rollback.
    pub fn undo(itinerary: Itinerary) -> Self {
        ItineraryUpdated {
            itinerary,
            diff: None,
            action: UpdateAction::Undo,
            session_id: None,
        }
    }

    pub fn is_undo(&self) -> bool {
        self.action == UpdateAction::Undo
    }
}

/// Payload of `disruption:error`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisruptionError {
    pub error: String,
}

impl ClientMessage {
    /// Creates a session:join message.
    pub fn session_join(session_id: impl Into<String>) -> Self {
        ClientMessage::SessionJoin {
            session_id: session_id.into(),
        }
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the message from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl ServerMessage {
    /// Returns the wire event name.
    pub fn event_name(&self) -> &'static str {
        match self {
            ServerMessage::DisruptionAcknowledged(_) => "disruption:acknowledged",
            ServerMessage::ItineraryUpdated(_) => "itinerary:updated",
            ServerMessage::DisruptionError(_) => "disruption:error",
        }
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the message from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
