// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard endpoints.

use crate::error::Result;
use crate::models::{LeaderboardEntry, LeaderboardEntryId, TeamId};
use crate::routes::crud::{destroy, ensure_team_exists, retrieve};
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

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/leaderboard/",
            get(list_leaderboard).post(create_entry),
        )
        .route(
            "/api/leaderboard/{id}/",
            get(retrieve::<LeaderboardEntry>)
                .put(replace_entry)
                .patch(update_entry)
                .delete(destroy::<LeaderboardEntry>),
        )
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardRequest {
    pub team_id: TeamId,
    #[serde(default)]
    pub total_calories: u64,
    #[serde(default)]
    pub total_activities: u32,
    #[serde(default)]
    pub rank: u32,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardPatch {
    pub team_id: Option<TeamId>,
    pub total_calories: Option<u64>,
    pub total_activities: Option<u32>,
    pub rank: Option<u32>,
}

/// Entries ordered by rank, best first.
async fn list_leaderboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LeaderboardEntry>>> {
    let mut entries = state.db.list::<LeaderboardEntry>().await?;
    entries.sort_by_key(|e| e.rank);
    Ok(Json(entries))
}

async fn create_entry(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LeaderboardRequest>,
) -> Result<(StatusCode, Json<LeaderboardEntry>)> {
    ensure_team_exists(&state.db, &body.team_id).await?;

    let entry = LeaderboardEntry {
        id: LeaderboardEntryId::generate(),
        team_id: body.team_id,
        total_calories: body.total_calories,
        total_activities: body.total_activities,
        rank: body.rank,
        updated_at: Utc::now(),
    };
    state.db.put(&entry).await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

async fn replace_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<LeaderboardRequest>,
) -> Result<Json<LeaderboardEntry>> {
    let existing: LeaderboardEntry = state.db.require(&id).await?;
    ensure_team_exists(&state.db, &body.team_id).await?;

    let entry = LeaderboardEntry {
        id: existing.id,
        team_id: body.team_id,
        total_calories: body.total_calories,
        total_activities: body.total_activities,
        rank: body.rank,
        updated_at: Utc::now(),
    };
    state.db.put(&entry).await?;

    Ok(Json(entry))
}

async fn update_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<LeaderboardPatch>,
) -> Result<Json<LeaderboardEntry>> {
    let mut entry: LeaderboardEntry = state.db.require(&id).await?;

    if let Some(team_id) = patch.team_id {
        ensure_team_exists(&state.db, &team_id).await?;
        entry.team_id = team_id;
    }
    if let Some(total_calories) = patch.total_calories {
        entry.total_calories = total_calories;
    }
    if let Some(total_activities) = patch.total_activities {
        entry.total_activities = total_activities;
    }
    if let Some(rank) = patch.rank {
        entry.rank = rank;
    }
    entry.updated_at = Utc::now();
    state.db.put(&entry).await?;

    Ok(Json(entry))
}
