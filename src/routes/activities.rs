// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity endpoints.

use crate::error::Result;
use crate::models::{Activity, ActivityId, UserId};
use crate::routes::crud::{destroy, ensure_user_exists, list, nullable, retrieve};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/activities/",
            get(list::<Activity>).post(create_activity),
        )
        .route(
            "/api/activities/{id}/",
            get(retrieve::<Activity>)
                .put(replace_activity)
                .patch(update_activity)
                .delete(destroy::<Activity>),
        )
}

#[derive(Debug, Deserialize, Validate)]
pub struct ActivityRequest {
    pub user_id: UserId,
    #[validate(length(min = 1, max = 100))]
    pub activity_type: String,
    /// Minutes
    pub duration: u32,
    pub calories: u32,
    /// Kilometers
    #[validate(range(min = 0.0))]
    pub distance: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ActivityPatch {
    pub user_id: Option<UserId>,
    #[validate(length(min = 1, max = 100))]
    pub activity_type: Option<String>,
    pub duration: Option<u32>,
    pub calories: Option<u32>,
    #[serde(default, deserialize_with = "nullable")]
    pub distance: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
}

async fn create_activity(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ActivityRequest>,
) -> Result<(StatusCode, Json<Activity>)> {
    body.validate()?;
    ensure_user_exists(&state.db, &body.user_id).await?;

    let activity = Activity {
        id: ActivityId::generate(),
        user_id: body.user_id,
        activity_type: body.activity_type,
        duration: body.duration,
        calories: body.calories,
        distance: body.distance,
        notes: body.notes,
        created_at: Utc::now(),
    };
    state.db.put(&activity).await?;

    tracing::info!(
        activity_id = %activity.id,
        user_id = %activity.user_id,
        activity_type = %activity.activity_type,
        "Activity logged"
    );

    Ok((StatusCode::CREATED, Json(activity)))
}

async fn replace_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<ActivityRequest>,
) -> Result<Json<Activity>> {
    body.validate()?;
    let existing: Activity = state.db.require(&id).await?;
    ensure_user_exists(&state.db, &body.user_id).await?;

    let activity = Activity {
        id: existing.id,
        user_id: body.user_id,
        activity_type: body.activity_type,
        duration: body.duration,
        calories: body.calories,
        distance: body.distance,
        notes: body.notes,
        created_at: existing.created_at,
    };
    state.db.put(&activity).await?;

    Ok(Json(activity))
}

async fn update_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<ActivityPatch>,
) -> Result<Json<Activity>> {
    patch.validate()?;
    let mut activity: Activity = state.db.require(&id).await?;

    if let Some(user_id) = patch.user_id {
        ensure_user_exists(&state.db, &user_id).await?;
        activity.user_id = user_id;
    }
    if let Some(activity_type) = patch.activity_type {
        activity.activity_type = activity_type;
    }
    if let Some(duration) = patch.duration {
        activity.duration = duration;
    }
    if let Some(calories) = patch.calories {
        activity.calories = calories;
    }
    if let Some(distance) = patch.distance {
        if distance.is_some_and(|d| d < 0.0) {
            return Err(crate::error::AppError::BadRequest(
                "distance must not be negative".to_string(),
            ));
        }
        activity.distance = distance;
    }
    if let Some(notes) = patch.notes {
        activity.notes = notes;
    }
    state.db.put(&activity).await?;

    Ok(Json(activity))
}
