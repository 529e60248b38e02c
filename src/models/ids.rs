// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed document identifiers.
//!
//! Every entity is keyed by a UUID v7 string, which doubles as its document
//! ID. v7 UUIDs sort by creation time, so listing a collection in document
//! order lists it in insertion order.

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

macro_rules! document_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        #[cfg_attr(feature = "binding-generation", derive(TS))]
        #[cfg_attr(
            feature = "binding-generation",
            ts(export, export_to = "frontend/src/generated/")
        )]
        pub struct $name(String);

        impl $name {
            /// Allocate a fresh, time-ordered identifier.
            pub fn generate() -> Self {
                Self(uuid::Uuid::now_v7().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

document_id!(
    /// Identifier of a team document.
    TeamId
);
document_id!(
    /// Identifier of a user document.
    UserId
);
document_id!(
    /// Identifier of an activity document.
    ActivityId
);
document_id!(
    /// Identifier of a leaderboard entry document.
    LeaderboardEntryId
);
document_id!(
    /// Identifier of a workout document.
    WorkoutId
);
