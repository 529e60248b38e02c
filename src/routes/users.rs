// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User endpoints.

use crate::error::{AppError, Result};
use crate::models::{TeamId, User, UserId};
use crate::routes::crud::{destroy, ensure_team_exists, nullable};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users/", get(list_users).post(create_user))
        .route(
            "/api/users/{id}/",
            get(get_user)
                .put(replace_user)
                .patch(update_user)
                .delete(destroy::<User>),
        )
}

/// User as returned by the API. Password material is never included.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub email: String,
    pub team_id: Option<TeamId>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            email: user.email,
            team_id: user.team_id,
            created_at: user.created_at,
        }
    }
}

/// Body for POST (create) and PUT (replace).
#[derive(Debug, Deserialize, Validate)]
pub struct UserRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub username: String,
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 200))]
    pub password: String,
    pub team_id: Option<TeamId>,
}

/// Body for PATCH. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UserPatch {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 200))]
    pub username: Option<String>,
    #[validate(email, length(max = 254))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub team_id: Option<Option<TeamId>>,
}

/// Fail with `Conflict` if `email` belongs to a user other than `owner`.
async fn ensure_email_available(state: &AppState, email: &str, owner: Option<&UserId>) -> Result<()> {
    match state.db.find_user_by_email(email).await? {
        Some(existing) if Some(&existing.id) != owner => Err(AppError::Conflict(format!(
            "A user with email {} already exists",
            email
        ))),
        _ => Ok(()),
    }
}

async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserResponse>>> {
    let users = state.db.list::<User>().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>> {
    let user: User = state.db.require(&id).await?;
    Ok(Json(user.into()))
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<UserRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    body.validate()?;
    ensure_email_available(&state, &body.email, None).await?;
    if let Some(team_id) = &body.team_id {
        ensure_team_exists(&state.db, team_id).await?;
    }

    let user = User {
        id: UserId::generate(),
        name: body.name,
        username: body.username,
        email: body.email,
        password_hash: state.passwords.hash(&body.password)?,
        team_id: body.team_id,
        created_at: Utc::now(),
    };
    state.db.put(&user).await?;

    tracing::info!(user_id = %user.id, "User created");

    Ok((StatusCode::CREATED, Json(user.into())))
}

async fn replace_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<UserRequest>,
) -> Result<Json<UserResponse>> {
    body.validate()?;
    let existing: User = state.db.require(&id).await?;
    ensure_email_available(&state, &body.email, Some(&existing.id)).await?;
    if let Some(team_id) = &body.team_id {
        ensure_team_exists(&state.db, team_id).await?;
    }

    let user = User {
        id: existing.id,
        name: body.name,
        username: body.username,
        email: body.email,
        password_hash: state.passwords.hash(&body.password)?,
        team_id: body.team_id,
        created_at: existing.created_at,
    };
    state.db.put(&user).await?;

    Ok(Json(user.into()))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<UserResponse>> {
    patch.validate()?;
    let mut user: User = state.db.require(&id).await?;

    if let Some(email) = patch.email {
        ensure_email_available(&state, &email, Some(&user.id)).await?;
        user.email = email;
    }
    if let Some(team_id) = patch.team_id {
        if let Some(team_id) = &team_id {
            ensure_team_exists(&state.db, team_id).await?;
        }
        user.team_id = team_id;
    }
    if let Some(name) = patch.name {
        user.name = name;
    }
    if let Some(username) = patch.username {
        user.username = username;
    }
    if let Some(password) = patch.password {
        user.password_hash = state.passwords.hash(&password)?;
    }

    state.db.put(&user).await?;

    Ok(Json(user.into()))
}
