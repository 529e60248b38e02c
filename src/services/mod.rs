// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod leaderboard;
pub mod password;
pub mod seed;

pub use leaderboard::{rank_teams, team_totals, TeamTotals};
pub use password::PasswordService;
pub use seed::{SeedPlan, SeedSummary};
