// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! dt-core: Shared data model for the detour itinerary client
//!
//! This crate provides the itinerary, diff and disruption types exchanged with
//! the replan server, plus the event-channel protocol. It performs no I/O.

/// Declares a wire enum whose JSON form is SCREAMING_SNAKE_CASE.
///
/// Generates `as_str`, `Display` and a case-insensitive `FromStr`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the string representation used on the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::Error;

            fn from_str(s: &str) -> $crate::error::Result<Self> {
                match s.to_ascii_uppercase().replace('-', "_").as_str() {
                    $( $wire => Ok($name::$variant), )+
                    _ => Err($crate::error::Error::InvalidValue {
                        kind: $kind,
                        value: s.to_string(),
                        valid: [$($wire),+].join(", "),
                    }),
                }
            }
        }
    };
}

pub mod diff;
pub mod disruption;
pub mod error;
pub mod itinerary;
pub mod protocol;

pub use diff::ItineraryDiff;
pub use disruption::{
    DisruptionEvent, DisruptionLog, DisruptionSource, DisruptionType, Severity,
    DISRUPTION_LOG_CAPACITY,
};
pub use error::{Error, Result};
pub use itinerary::{
    FrictionLevel, Itinerary, ItineraryStatus, Leg, Stop, StopPriority, StopStatus, TransportMode,
    UserConstraints,
};
pub use protocol::{
    ClientMessage, DisruptionAcknowledged, DisruptionError, ItineraryUpdated, ServerMessage,
    UpdateAction,
};
