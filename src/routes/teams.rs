// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Team endpoints.

use crate::error::Result;
use crate::models::{Team, TeamId, User};
use crate::routes::crud::{destroy, nullable};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/teams/", get(list_teams).post(create_team))
        .route(
            "/api/teams/{id}/",
            get(get_team)
                .put(replace_team)
                .patch(update_team)
                .delete(destroy::<Team>),
        )
}

/// Team as returned by the API, with its current member count.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct TeamResponse {
    pub id: TeamId,
    pub name: String,
    pub description: Option<String>,
    pub members_count: u32,
    pub created_at: DateTime<Utc>,
}

impl TeamResponse {
    fn new(team: Team, members_count: u32) -> Self {
        Self {
            id: team.id,
            name: team.name,
            description: team.description,
            members_count,
            created_at: team.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct TeamRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TeamPatch {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
}

/// Number of users per team ID.
fn member_counts(users: &[User]) -> HashMap<&TeamId, u32> {
    let mut counts = HashMap::new();
    for team_id in users.iter().filter_map(|u| u.team_id.as_ref()) {
        *counts.entry(team_id).or_insert(0) += 1;
    }
    counts
}

async fn members_of(state: &AppState, team_id: &TeamId) -> Result<u32> {
    let users = state.db.list::<User>().await?;
    Ok(member_counts(&users).get(team_id).copied().unwrap_or(0))
}

async fn list_teams(State(state): State<Arc<AppState>>) -> Result<Json<Vec<TeamResponse>>> {
    let teams = state.db.list::<Team>().await?;
    let users = state.db.list::<User>().await?;
    let counts = member_counts(&users);

    let body = teams
        .into_iter()
        .map(|team| {
            let count = counts.get(&team.id).copied().unwrap_or(0);
            TeamResponse::new(team, count)
        })
        .collect();

    Ok(Json(body))
}

async fn get_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TeamResponse>> {
    let team: Team = state.db.require(&id).await?;
    let count = members_of(&state, &team.id).await?;
    Ok(Json(TeamResponse::new(team, count)))
}

async fn create_team(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TeamRequest>,
) -> Result<(StatusCode, Json<TeamResponse>)> {
    body.validate()?;

    let team = Team::new(body.name, body.description, Utc::now());
    state.db.put(&team).await?;

    tracing::info!(team_id = %team.id, name = %team.name, "Team created");

    Ok((StatusCode::CREATED, Json(TeamResponse::new(team, 0))))
}

async fn replace_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<TeamRequest>,
) -> Result<Json<TeamResponse>> {
    body.validate()?;
    let mut team: Team = state.db.require(&id).await?;

    team.name = body.name;
    team.description = body.description;
    state.db.put(&team).await?;

    let count = members_of(&state, &team.id).await?;
    Ok(Json(TeamResponse::new(team, count)))
}

async fn update_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<TeamPatch>,
) -> Result<Json<TeamResponse>> {
    patch.validate()?;
    let mut team: Team = state.db.require(&id).await?;

    if let Some(name) = patch.name {
        team.name = name;
    }
    if let Some(description) = patch.description {
        team.description = description;
    }
    state.db.put(&team).await?;

    let count = members_of(&state, &team.id).await?;
    Ok(Json(TeamResponse::new(team, count)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;

    fn member(team: Option<&str>) -> User {
        User {
            id: UserId::generate(),
            name: "Member".to_string(),
            username: String::new(),
            email: "m@example.com".to_string(),
            password_hash: String::new(),
            team_id: team.map(TeamId::from),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_member_counts() {
        let users = vec![member(Some("a")), member(Some("a")), member(Some("b")), member(None)];
        let counts = member_counts(&users);

        assert_eq!(counts.get(&TeamId::from("a")), Some(&2));
        assert_eq!(counts.get(&TeamId::from("b")), Some(&1));
        assert_eq!(counts.len(), 2);
    }
}
