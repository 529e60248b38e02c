// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reset the database and fill it with sample OctoFit data.
//!
//! Usage:
//!   OCTOFIT_STORAGE=firestore FIRESTORE_EMULATOR_HOST=localhost:8080 \
//!     cargo run --bin populate-db
//!
//! Every existing team, user, activity, leaderboard entry and workout is
//! deleted before the new data is written.

use anyhow::Context;
use chrono::Utc;
use octofit_tracker::config::Config;
use octofit_tracker::db::DocumentDb;
use octofit_tracker::services::{seed, PasswordService};
use octofit_tracker::time_utils::format_utc_rfc3339;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        storage = ?config.storage,
        project = %config.gcp_project_id,
        "Populating OctoFit database"
    );

    let db = DocumentDb::connect(&config)
        .await
        .context("Failed to connect to document store")?;
    let passwords = PasswordService::default();
    let mut rng = StdRng::from_entropy();

    let summary = seed::run(&db, &passwords, &mut rng)
        .await
        .context("Seeding failed")?;

    println!();
    println!("=== Database Population Complete ===");
    println!("Finished:            {}", format_utc_rfc3339(Utc::now()));
    println!("Teams:               {}", summary.teams);
    println!("Users:               {}", summary.users);
    println!("Activities:          {}", summary.activities);
    println!("Leaderboard entries: {}", summary.leaderboard);
    println!("Workouts:            {}", summary.workouts);

    Ok(())
}
