// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity model for storage and API.

use crate::models::{ActivityId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Logged activity stored in the `activities` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct Activity {
    /// Document ID
    pub id: ActivityId,
    /// Owner
    pub user_id: UserId,
    /// Free-text type (Running, Yoga, ...)
    pub activity_type: String,
    /// Duration in minutes
    pub duration: u32,
    /// Calories burned
    pub calories: u32,
    /// Distance in kilometers
    pub distance: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
