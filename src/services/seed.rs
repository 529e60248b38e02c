// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sample data seeding.
//!
//! Handles the full reset workflow:
//! 1. Build two fixed teams with five fixed members each
//! 2. Generate 3-7 random activities per user
//! 3. Compute team totals and ranks for the leaderboard
//! 4. Add the fixed workout suggestions
//! 5. Replace everything in the store in one transaction

use crate::db::{collections, DocumentDb, PendingDocument};
use crate::error::{AppError, Result};
use crate::models::{Activity, ActivityId, LeaderboardEntry, Team, User, UserId, Workout, WorkoutId};
use crate::services::leaderboard::{rank_teams, team_totals};
use crate::services::PasswordService;
use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

pub const ACTIVITY_TYPES: [&str; 7] = [
    "Running",
    "Swimming",
    "Cycling",
    "Weight Training",
    "Yoga",
    "Boxing",
    "HIIT",
];

/// Activity types that cover a distance.
pub const DISTANCE_ACTIVITY_TYPES: [&str; 3] = ["Running", "Swimming", "Cycling"];

pub const ACTIVITIES_PER_USER: (u32, u32) = (3, 7);
pub const DURATION_MINUTES: (u32, u32) = (20, 120);
pub const CALORIES_PER_MINUTE: (u32, u32) = (5, 12);
pub const DISTANCE_KM: (f64, f64) = (2.0, 15.0);
pub const MAX_BACKDATE_DAYS: i64 = 30;

struct TeamFixture {
    name: &'static str,
    description: &'static str,
    members: [UserFixture; 5],
}

struct UserFixture {
    name: &'static str,
    username: &'static str,
    email: &'static str,
    password: &'static str,
}

struct WorkoutFixture {
    name: &'static str,
    description: &'static str,
    difficulty: &'static str,
    duration: u32,
    calories_estimate: u32,
    category: &'static str,
}

const fn member(
    name: &'static str,
    username: &'static str,
    email: &'static str,
    password: &'static str,
) -> UserFixture {
    UserFixture {
        name,
        username,
        email,
        password,
    }
}

const TEAMS: [TeamFixture; 2] = [
    TeamFixture {
        name: "Team Marvel",
        description: "Earth's Mightiest Heroes",
        members: [
            member("Iron Man", "ironman", "tony.stark@marvel.com", "arc_reactor_3000"),
            member(
                "Captain America",
                "captainamerica",
                "steve.rogers@marvel.com",
                "super_soldier_serum",
            ),
            member("Thor", "thor", "thor.odinson@marvel.com", "mjolnir_worthy"),
            member(
                "Black Widow",
                "blackwidow",
                "natasha.romanoff@marvel.com",
                "red_room_graduate",
            ),
            member("Hulk", "hulk", "bruce.banner@marvel.com", "gamma_radiation"),
        ],
    },
    TeamFixture {
        name: "Team DC",
        description: "Justice League United",
        members: [
            member("Superman", "superman", "clark.kent@dc.com", "kryptonite_free"),
            member("Batman", "batman", "bruce.wayne@dc.com", "dark_knight_rises"),
            member(
                "Wonder Woman",
                "wonderwoman",
                "diana.prince@dc.com",
                "lasso_of_truth",
            ),
            member("Flash", "flash", "barry.allen@dc.com", "speed_force"),
            member("Aquaman", "aquaman", "arthur.curry@dc.com", "king_of_atlantis"),
        ],
    },
];

const WORKOUTS: [WorkoutFixture; 8] = [
    WorkoutFixture {
        name: "Super Soldier Circuit",
        description: "A high-intensity circuit training inspired by Captain America's training regimen",
        difficulty: "advanced",
        duration: 45,
        calories_estimate: 500,
        category: "strength",
    },
    WorkoutFixture {
        name: "Speed Force Sprints",
        description: "Lightning-fast interval sprints to build speed and endurance",
        difficulty: "intermediate",
        duration: 30,
        calories_estimate: 400,
        category: "cardio",
    },
    WorkoutFixture {
        name: "Amazonian Warrior Yoga",
        description: "Flexibility and strength training inspired by Wonder Woman",
        difficulty: "beginner",
        duration: 40,
        calories_estimate: 250,
        category: "flexibility",
    },
    WorkoutFixture {
        name: "Dark Knight Boxing",
        description: "Advanced boxing and martial arts workout for ultimate fitness",
        difficulty: "advanced",
        duration: 60,
        calories_estimate: 650,
        category: "cardio",
    },
    WorkoutFixture {
        name: "Atlantean Swimming",
        description: "Full-body swimming workout for strength and endurance",
        difficulty: "intermediate",
        duration: 45,
        calories_estimate: 450,
        category: "cardio",
    },
    WorkoutFixture {
        name: "Asgardian Hammer Swing",
        description: "Functional strength training with weights and power movements",
        difficulty: "advanced",
        duration: 50,
        calories_estimate: 550,
        category: "strength",
    },
    WorkoutFixture {
        name: "Arc Reactor Core",
        description: "Core strengthening exercises for stability and power",
        difficulty: "beginner",
        duration: 25,
        calories_estimate: 200,
        category: "strength",
    },
    WorkoutFixture {
        name: "Gamma Smash HIIT",
        description: "High-intensity interval training for maximum calorie burn",
        difficulty: "intermediate",
        duration: 35,
        calories_estimate: 500,
        category: "cardio",
    },
];

/// The complete data set written by a seed run.
#[derive(Debug, Clone)]
pub struct SeedPlan {
    pub teams: Vec<Team>,
    pub users: Vec<User>,
    pub activities: Vec<Activity>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub workouts: Vec<Workout>,
}

/// Entity counts read back from the store after seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub teams: usize,
    pub users: usize,
    pub activities: usize,
    pub leaderboard: usize,
    pub workouts: usize,
}

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Generate the random activities of one user.
pub fn generate_activities<R: Rng + ?Sized>(
    rng: &mut R,
    user: &User,
    now: DateTime<Utc>,
) -> Vec<Activity> {
    let count = rng.gen_range(ACTIVITIES_PER_USER.0..=ACTIVITIES_PER_USER.1);

    (0..count)
        .map(|_| {
            let activity_type = *ACTIVITY_TYPES.choose(&mut *rng).unwrap_or(&ACTIVITY_TYPES[0]);
            let duration = rng.gen_range(DURATION_MINUTES.0..=DURATION_MINUTES.1);
            let calories = duration * rng.gen_range(CALORIES_PER_MINUTE.0..=CALORIES_PER_MINUTE.1);
            let distance = DISTANCE_ACTIVITY_TYPES
                .contains(&activity_type)
                .then(|| round2(rng.gen_range(DISTANCE_KM.0..=DISTANCE_KM.1)));
            let days_ago = rng.gen_range(0..=MAX_BACKDATE_DAYS);

            Activity {
                id: ActivityId::generate(),
                user_id: user.id.clone(),
                activity_type: activity_type.to_string(),
                duration,
                calories,
                distance,
                notes: Some(format!("{} completed {}", user.name, activity_type)),
                created_at: now - Duration::days(days_ago),
            }
        })
        .collect()
}

impl SeedPlan {
    /// Build the full sample data set in memory.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        now: DateTime<Utc>,
        passwords: &PasswordService,
    ) -> Result<Self> {
        tracing::info!("Creating teams...");
        let teams: Vec<Team> = TEAMS
            .iter()
            .map(|f| Team::new(f.name, Some(f.description.to_string()), now))
            .collect();
        let names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
        tracing::info!(count = teams.len(), "Created teams: {}", names.join(", "));

        let mut users = Vec::new();
        for (fixture, team) in TEAMS.iter().zip(&teams) {
            tracing::info!(team = %team.name, "Creating members...");
            for m in &fixture.members {
                users.push(User {
                    id: UserId::generate(),
                    name: m.name.to_string(),
                    username: m.username.to_string(),
                    email: m.email.to_string(),
                    password_hash: passwords.hash(m.password)?,
                    team_id: Some(team.id.clone()),
                    created_at: now,
                });
            }
        }
        tracing::info!(count = users.len(), "Created {} users", users.len());

        tracing::info!("Creating activities...");
        let activities: Vec<Activity> = users
            .iter()
            .flat_map(|u| generate_activities(&mut *rng, u, now))
            .collect();
        tracing::info!(count = activities.len(), "Created {} activities", activities.len());

        tracing::info!("Creating leaderboard entries...");
        let leaderboard = rank_teams(team_totals(&teams, &users, &activities), now);
        tracing::info!(count = leaderboard.len(), "Created leaderboard entries");

        tracing::info!("Creating workout suggestions...");
        let workouts: Vec<Workout> = WORKOUTS
            .iter()
            .map(|w| Workout {
                id: WorkoutId::generate(),
                name: w.name.to_string(),
                description: w.description.to_string(),
                difficulty: w.difficulty.to_string(),
                duration: w.duration,
                calories_estimate: w.calories_estimate,
                category: w.category.to_string(),
                created_at: now,
            })
            .collect();
        tracing::info!(
            count = workouts.len(),
            "Created {} workout suggestions",
            workouts.len()
        );

        Ok(Self {
            teams,
            users,
            activities,
            leaderboard,
            workouts,
        })
    }

    /// Check uniqueness and references before anything is written.
    pub fn validate(&self) -> Result<()> {
        let mut emails = HashSet::new();
        for user in &self.users {
            if !emails.insert(user.email.to_lowercase()) {
                return Err(AppError::Conflict(format!(
                    "Duplicate email in seed data: {}",
                    user.email
                )));
            }
        }

        let team_ids: HashSet<&str> = self.teams.iter().map(|t| t.id.as_str()).collect();
        let user_ids: HashSet<&str> = self.users.iter().map(|u| u.id.as_str()).collect();

        for user in &self.users {
            if let Some(team_id) = &user.team_id {
                if !team_ids.contains(team_id.as_str()) {
                    return Err(AppError::BadRequest(format!(
                        "User {} references unknown team {}",
                        user.email, team_id
                    )));
                }
            }
        }
        for activity in &self.activities {
            if !user_ids.contains(activity.user_id.as_str()) {
                return Err(AppError::BadRequest(format!(
                    "Activity {} references unknown user {}",
                    activity.id, activity.user_id
                )));
            }
        }
        for entry in &self.leaderboard {
            if !team_ids.contains(entry.team_id.as_str()) {
                return Err(AppError::BadRequest(format!(
                    "Leaderboard entry references unknown team {}",
                    entry.team_id
                )));
            }
        }

        Ok(())
    }

    /// Serialize every record for a bulk write.
    pub fn documents(&self) -> Result<Vec<PendingDocument>> {
        let mut docs = Vec::new();
        for t in &self.teams {
            docs.push(PendingDocument::from_document(t)?);
        }
        for u in &self.users {
            docs.push(PendingDocument::from_document(u)?);
        }
        for a in &self.activities {
            docs.push(PendingDocument::from_document(a)?);
        }
        for l in &self.leaderboard {
            docs.push(PendingDocument::from_document(l)?);
        }
        for w in &self.workouts {
            docs.push(PendingDocument::from_document(w)?);
        }
        Ok(docs)
    }
}

/// Wipe the store and write a freshly generated sample data set.
pub async fn run<R: Rng + ?Sized>(
    db: &DocumentDb,
    passwords: &PasswordService,
    rng: &mut R,
) -> Result<SeedSummary> {
    let plan = SeedPlan::generate(rng, Utc::now(), passwords)?;
    apply(db, &plan).await
}

/// Write an already generated plan, replacing all existing data.
pub async fn apply(db: &DocumentDb, plan: &SeedPlan) -> Result<SeedSummary> {
    plan.validate()?;

    for entry in &plan.leaderboard {
        let team_name = plan
            .teams
            .iter()
            .find(|t| t.id == entry.team_id)
            .map(|t| t.name.as_str())
            .unwrap_or("?");
        tracing::info!(
            team = team_name,
            rank = entry.rank,
            total_calories = entry.total_calories,
            total_activities = entry.total_activities,
            "Leaderboard standing"
        );
    }

    tracing::info!("Clearing existing data...");
    let outcome = db.replace_all(plan.documents()?).await?;
    tracing::info!(
        deleted = outcome.deleted,
        written = outcome.written,
        "Existing data cleared and seed data written"
    );

    let summary = SeedSummary {
        teams: db.count(collections::TEAMS).await?,
        users: db.count(collections::USERS).await?,
        activities: db.count(collections::ACTIVITIES).await?,
        leaderboard: db.count(collections::LEADERBOARD).await?,
        workouts: db.count(collections::WORKOUTS).await?,
    };

    Ok(summary)
}
