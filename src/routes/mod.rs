// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod activities;
pub mod crud;
pub mod leaderboard;
pub mod teams;
pub mod users;
pub mod workouts;

use crate::AppState;
use axum::extract::State;
use axum::http::{header, Method};
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

/// Links to every collection endpoint.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct ApiRootResponse {
    pub users: String,
    pub teams: String,
    pub activities: String,
    pub leaderboard: String,
    pub workouts: String,
    pub base_url: String,
}

async fn api_root(State(state): State<Arc<AppState>>) -> Json<ApiRootResponse> {
    let base_url = state.config.base_url();
    let link = |collection: &str| format!("{}/api/{}/", base_url, collection);

    Json(ApiRootResponse {
        users: link("users"),
        teams: link("teams"),
        activities: link("activities"),
        leaderboard: link("leaderboard"),
        workouts: link("workouts"),
        base_url: base_url.clone(),
    })
}

/// Whether a browser origin may call the API.
///
/// Allows the configured frontend, local development servers and
/// Codespaces port forwards.
fn origin_allowed(origin: &str, frontend_url: &str) -> bool {
    origin == frontend_url
        || is_local_origin(origin, "localhost")
        || is_local_origin(origin, "127.0.0.1")
        || origin.ends_with(".app.github.dev")
}

/// `http://{host}` with an optional port and nothing else.
fn is_local_origin(origin: &str, host: &str) -> bool {
    match origin
        .strip_prefix("http://")
        .and_then(|rest| rest.strip_prefix(host))
    {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix(':')
            .is_some_and(|port| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit())),
        None => false,
    }
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let frontend_url = state.config.frontend_url.clone();
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                origin_allowed(origin.to_str().unwrap_or(""), &frontend_url)
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/", get(api_root))
        .route("/api/", get(api_root))
        .route("/health", get(health_check))
        .merge(users::routes())
        .merge(teams::routes())
        .merge(activities::routes())
        .merge(leaderboard::routes())
        .merge(workouts::routes())
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_allowed() {
        let frontend = "https://octofit.example.com";

        assert!(origin_allowed(frontend, frontend));
        assert!(origin_allowed("http://localhost:3000", frontend));
        assert!(origin_allowed("http://127.0.0.1:3000", frontend));
        assert!(origin_allowed(
            "https://fluffy-space-waddle-3000.app.github.dev",
            frontend
        ));

        assert!(!origin_allowed("https://evil.example.com", frontend));
        assert!(!origin_allowed("https://app.github.dev.evil.com", frontend));
    }

    #[test]
    fn test_local_origin_requires_exact_host() {
        let frontend = "https://octofit.example.com";

        assert!(origin_allowed("http://localhost", frontend));
        assert!(origin_allowed("http://127.0.0.1", frontend));

        assert!(!origin_allowed("http://localhost.evil.com", frontend));
        assert!(!origin_allowed("http://localhost:3000.evil.com", frontend));
        assert!(!origin_allowed("http://127.0.0.1.evil.com", frontend));
        assert!(!origin_allowed("http://localhostevil.com", frontend));
        assert!(!origin_allowed("http://localhost:", frontend));
    }
}
