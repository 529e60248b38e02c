//! Leaderboard entry model.

use crate::models::{LeaderboardEntryId, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Per-team standing stored in the `leaderboard` collection.
///
/// Totals are a snapshot taken when the entry was written. They are not
/// recomputed when activities change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct LeaderboardEntry {
    /// Document ID
    pub id: LeaderboardEntryId,
    pub team_id: TeamId,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_calories: u64,
    pub total_activities: u32,
    /// 1 = most calories burned
    pub rank: u32,
    pub updated_at: DateTime<Utc>,
}
