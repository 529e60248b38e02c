// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout suggestion endpoints.

use crate::error::Result;
use crate::models::{Workout, WorkoutId};
use crate::routes::crud::{destroy, list, retrieve};
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
        .route("/api/workouts/", get(list::<Workout>).post(create_workout))
        .route(
            "/api/workouts/{id}/",
            get(retrieve::<Workout>)
                .put(replace_workout)
                .patch(update_workout)
                .delete(destroy::<Workout>),
        )
}

/// Difficulty and category are free text; only their length is checked.
#[derive(Debug, Deserialize, Validate)]
pub struct WorkoutRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: String,
    #[validate(length(min = 1, max = 50))]
    pub difficulty: String,
    pub duration: u32,
    pub calories_estimate: u32,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct WorkoutPatch {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub difficulty: Option<String>,
    pub duration: Option<u32>,
    pub calories_estimate: Option<u32>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
}

async fn create_workout(
    State(state): State<Arc<AppState>>,
    Json(body): Json<WorkoutRequest>,
) -> Result<(StatusCode, Json<Workout>)> {
    body.validate()?;

    let workout = Workout {
        id: WorkoutId::generate(),
        name: body.name,
        description: body.description,
        difficulty: body.difficulty,
        duration: body.duration,
        calories_estimate: body.calories_estimate,
        category: body.category,
        created_at: Utc::now(),
    };
    state.db.put(&workout).await?;

    Ok((StatusCode::CREATED, Json(workout)))
}

async fn replace_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<WorkoutRequest>,
) -> Result<Json<Workout>> {
    body.validate()?;
    let existing: Workout = state.db.require(&id).await?;

    let workout = Workout {
        id: existing.id,
        name: body.name,
        description: body.description,
        difficulty: body.difficulty,
        duration: body.duration,
        calories_estimate: body.calories_estimate,
        category: body.category,
        created_at: existing.created_at,
    };
    state.db.put(&workout).await?;

    Ok(Json(workout))
}

async fn update_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<WorkoutPatch>,
) -> Result<Json<Workout>> {
    patch.validate()?;
    let mut workout: Workout = state.db.require(&id).await?;

    if let Some(name) = patch.name {
        workout.name = name;
    }
    if let Some(description) = patch.description {
        workout.description = description;
    }
    if let Some(difficulty) = patch.difficulty {
        workout.difficulty = difficulty;
    }
    if let Some(duration) = patch.duration {
        workout.duration = duration;
    }
    if let Some(calories_estimate) = patch.calories_estimate {
        workout.calories_estimate = calories_estimate;
    }
    if let Some(category) = patch.category {
        workout.category = category;
    }
    state.db.put(&workout).await?;

    Ok(Json(workout))
}
