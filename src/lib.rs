// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! OctoFit Tracker: team fitness tracking backend
//!
//! This crate provides the REST API for users, teams, activities, the team
//! leaderboard and workout suggestions, plus the sample data seeder.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::DocumentDb;
use services::PasswordService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: DocumentDb,
    pub passwords: PasswordService,
}
