// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OctoFit Tracker API Server
//!
//! Serves users, teams, activities, the team leaderboard and workout
//! suggestions as a JSON REST API.

use anyhow::Context;
use octofit_tracker::{config::Config, db::DocumentDb, services::PasswordService, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        port = config.port,
        storage = ?config.storage,
        base_url = %config.base_url(),
        "Starting OctoFit Tracker API"
    );

    let db = DocumentDb::connect(&config)
        .await
        .context("Failed to connect to document store")?;

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        passwords: PasswordService::default(),
    });

    // Build router
    let app = octofit_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("octofit_tracker=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
