// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Handlers shared by the collection endpoints.

use crate::db::{Document, DocumentDb};
use crate::error::{AppError, Result};
use crate::models::{Team, TeamId, User, UserId};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

/// List a collection as stored.
pub async fn list<T: Document + Serialize>(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<T>>> {
    Ok(Json(state.db.list::<T>().await?))
}

/// Fetch one document as stored.
pub async fn retrieve<T: Document + Serialize>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<T>> {
    Ok(Json(state.db.require::<T>(&id).await?))
}

/// Delete one document. References to it elsewhere are left in place.
pub async fn destroy<T: Document>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.db.delete::<T>(&id).await?;
    tracing::info!(collection = T::COLLECTION, id = %id, "Document deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Reject a `team_id` that names no stored team.
pub async fn ensure_team_exists(db: &DocumentDb, team_id: &TeamId) -> Result<()> {
    match db.get::<Team>(team_id.as_str()).await? {
        Some(_) => Ok(()),
        None => Err(AppError::BadRequest(format!("Unknown team_id: {}", team_id))),
    }
}

/// Reject a `user_id` that names no stored user.
pub async fn ensure_user_exists(db: &DocumentDb, user_id: &UserId) -> Result<()> {
    match db.get::<User>(user_id.as_str()).await? {
        Some(_) => Ok(()),
        None => Err(AppError::BadRequest(format!("Unknown user_id: {}", user_id))),
    }
}

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`).
///
/// Use with `#[serde(default, deserialize_with = "nullable")]`.
pub fn nullable<'de, T, D>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "nullable")]
        description: Option<Option<String>>,
    }

    #[test]
    fn test_nullable_tri_state() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.description, None);

        let null: Patch = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(null.description, Some(None));

        let set: Patch = serde_json::from_str(r#"{"description": "x"}"#).unwrap();
        assert_eq!(set.description, Some(Some("x".to_string())));
    }
}
