//! Database layer (document store).
//!
//! The application talks to [`DocumentDb`], which is backed either by
//! Firestore or by an in-process [`memory::MemoryStore`].

pub mod document;
pub mod firestore;
pub mod memory;

pub use document::{DocumentDb, PendingDocument, ReplaceOutcome};

use crate::models::{Activity, LeaderboardEntry, Team, User, Workout};
use serde::{de::DeserializeOwned, Serialize};

/// Collection names as constants.
pub mod collections {
    pub const TEAMS: &str = "teams";
    pub const USERS: &str = "users";
    pub const ACTIVITIES: &str = "activities";
    pub const LEADERBOARD: &str = "leaderboard";
    pub const WORKOUTS: &str = "workouts";

    /// Every collection owned by the application.
    pub const ALL: [&str; 5] = [TEAMS, USERS, ACTIVITIES, LEADERBOARD, WORKOUTS];
}

/// A record that lives in its own collection, keyed by its ID.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: &'static str;

    fn document_id(&self) -> &str;
}

impl Document for Team {
    const COLLECTION: &'static str = collections::TEAMS;

    fn document_id(&self) -> &str {
        self.id.as_str()
    }
}

impl Document for User {
    const COLLECTION: &'static str = collections::USERS;

    fn document_id(&self) -> &str {
        self.id.as_str()
    }
}

impl Document for Activity {
    const COLLECTION: &'static str = collections::ACTIVITIES;

    fn document_id(&self) -> &str {
        self.id.as_str()
    }
}

impl Document for LeaderboardEntry {
    const COLLECTION: &'static str = collections::LEADERBOARD;

    fn document_id(&self) -> &str {
        self.id.as_str()
    }
}

impl Document for Workout {
    const COLLECTION: &'static str = collections::WORKOUTS;

    fn document_id(&self) -> &str {
        self.id.as_str()
    }
}
