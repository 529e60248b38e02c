// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Team model for storage and API.

use crate::models::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Team stored in the `teams` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Document ID
    pub id: TeamId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn new(name: impl Into<String>, description: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: TeamId::generate(),
            name: name.into(),
            description,
            created_at: now,
        }
    }
}
