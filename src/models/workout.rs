// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout suggestion model.

use crate::models::WorkoutId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Suggested workout stored in the `workouts` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct Workout {
    /// Document ID
    pub id: WorkoutId,
    pub name: String,
    pub description: String,
    /// beginner, intermediate or advanced (not enforced)
    pub difficulty: String,
    /// Duration in minutes
    pub duration: u32,
    pub calories_estimate: u32,
    /// cardio, strength, flexibility, ... (not enforced)
    pub category: String,
    pub created_at: DateTime<Utc>,
}
