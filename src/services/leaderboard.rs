// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Team standings: calorie totals per team and ranking.

use crate::models::{Activity, LeaderboardEntry, LeaderboardEntryId, Team, TeamId, User};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Aggregated activity totals for one team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamTotals {
    pub team_id: TeamId,
    pub total_calories: u64,
    pub total_activities: u32,
}

/// Sum calories and count activities per team.
///
/// An activity counts towards a team when its user belongs to that team.
/// Activities of unknown or team-less users are ignored. The result follows
/// the order of `teams`.
pub fn team_totals(teams: &[Team], users: &[User], activities: &[Activity]) -> Vec<TeamTotals> {
    let team_of_user: HashMap<&str, &TeamId> = users
        .iter()
        .filter_map(|u| u.team_id.as_ref().map(|t| (u.id.as_str(), t)))
        .collect();

    let mut totals: Vec<TeamTotals> = teams
        .iter()
        .map(|t| TeamTotals {
            team_id: t.id.clone(),
            total_calories: 0,
            total_activities: 0,
        })
        .collect();

    let index_of_team: HashMap<TeamId, usize> = totals
        .iter()
        .enumerate()
        .map(|(i, t)| (t.team_id.clone(), i))
        .collect();

    for activity in activities {
        let Some(team_id) = team_of_user.get(activity.user_id.as_str()) else {
            continue;
        };
        if let Some(&i) = index_of_team.get(*team_id) {
            totals[i].total_calories += u64::from(activity.calories);
            totals[i].total_activities += 1;
        }
    }

    totals
}

/// Assign ranks by descending calorie total, starting at 1.
///
/// A team only outranks a later-listed team when its total is strictly
/// greater, so on equal totals the later-listed team ranks first.
pub fn rank_teams(totals: Vec<TeamTotals>, now: DateTime<Utc>) -> Vec<LeaderboardEntry> {
    let mut ordered = totals;
    ordered.reverse();
    ordered.sort_by(|a, b| b.total_calories.cmp(&a.total_calories));

    ordered
        .into_iter()
        .zip(1u32..)
        .map(|(t, rank)| LeaderboardEntry {
            id: LeaderboardEntryId::generate(),
            team_id: t.team_id,
            total_calories: t.total_calories,
            total_activities: t.total_activities,
            rank,
            updated_at: now,
        })
        .collect()
}
