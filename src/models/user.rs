//! User model for storage and API.

use crate::models::{TeamId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User profile stored in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Document ID
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Login handle (may be empty)
    #[serde(default)]
    pub username: String,
    /// Email address, unique across users
    pub email: String,
    /// Argon2 PHC string; plaintext passwords are never stored
    pub password_hash: String,
    /// Team membership
    pub team_id: Option<TeamId>,
    /// When the user was created
    pub created_at: DateTime<Utc>,
}
