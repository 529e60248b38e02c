// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! REST API tests against the in-memory store.

use axum::http::StatusCode;
use serde_json::{json, Value};

mod common;
use common::{create_test_app, json_body, send};

async fn create(app: &axum::Router, uri: &str, body: Value) -> Value {
    let response = send(app, "POST", uri, Some(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED, "POST {}", uri);
    json_body(response).await
}

async fn create_team(app: &axum::Router, name: &str) -> String {
    let team = create(app, "/api/teams/", json!({ "name": name })).await;
    team["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let (app, _state) = create_test_app();

    let response = send(&app, "GET", "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test]
async fn test_api_root_links() {
    let (app, _state) = create_test_app();

    for uri in ["/", "/api/"] {
        let response = send(&app, "GET", uri, None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["base_url"], "http://localhost:8000");
        assert_eq!(body["users"], "http://localhost:8000/api/users/");
        assert_eq!(body["teams"], "http://localhost:8000/api/teams/");
        assert_eq!(body["activities"], "http://localhost:8000/api/activities/");
        assert_eq!(body["leaderboard"], "http://localhost:8000/api/leaderboard/");
        assert_eq!(body["workouts"], "http://localhost:8000/api/workouts/");
    }
}

#[tokio::test]
async fn test_security_headers_on_api_responses() {
    let (app, _state) = create_test_app();

    let response = send(&app, "GET", "/api/teams/", None).await;
    assert_eq!(response.headers().get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(response.headers().get("cache-control").unwrap(), "no-store");
}

#[tokio::test]
async fn test_cors_allows_codespaces_origin() {
    let (app, _state) = create_test_app();

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/teams/")
        .header("origin", "https://octo-space-3000.app.github.dev")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "https://octo-space-3000.app.github.dev"
    );
}

#[tokio::test]
async fn test_user_crud_hides_password() {
    let (app, state) = create_test_app();
    let team_id = create_team(&app, "Team Marvel").await;

    let user = create(
        &app,
        "/api/users/",
        json!({
            "name": "Iron Man",
            "username": "ironman",
            "email": "tony.stark@marvel.com",
            "password": "arc_reactor_3000",
            "team_id": team_id,
        }),
    )
    .await;
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());
    assert_eq!(user["username"], "ironman");
    assert_eq!(user["team_id"], team_id.as_str());

    let id = user["id"].as_str().unwrap().to_string();

    // Stored hash verifies against the submitted password
    let stored: octofit_tracker::models::User = state.db.require(&id).await.unwrap();
    assert!(state.passwords.verify("arc_reactor_3000", &stored.password_hash));

    let response = send(
        &app,
        "PATCH",
        &format!("/api/users/{}/", id),
        Some(json!({ "name": "Tony Stark", "team_id": null })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let patched = json_body(response).await;
    assert_eq!(patched["name"], "Tony Stark");
    assert_eq!(patched["email"], "tony.stark@marvel.com");
    assert!(patched["team_id"].is_null());

    let response = send(&app, "GET", "/api/users/", None).await;
    let listed = json_body(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert!(listed[0].get("password_hash").is_none());

    let response = send(&app, "DELETE", &format!("/api/users/{}/", id), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "GET", &format!("/api/users/{}/", id), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"], "not_found");
}

#[tokio::test]
async fn test_duplicate_email_conflict() {
    let (app, _state) = create_test_app();
    let body = json!({
        "name": "Batman",
        "email": "bruce.wayne@dc.com",
        "password": "dark_knight_rises",
    });

    create(&app, "/api/users/", body.clone()).await;

    let response = send(&app, "POST", "/api/users/", Some(body)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(json_body(response).await["error"], "conflict");
}

#[tokio::test]
async fn test_invalid_email_rejected() {
    let (app, _state) = create_test_app();

    let response = send(
        &app,
        "POST",
        "/api/users/",
        Some(json!({ "name": "Nobody", "email": "not-an-email", "password": "x" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"].get("email").is_some());
}

#[tokio::test]
async fn test_unknown_team_reference_rejected() {
    let (app, _state) = create_test_app();

    let response = send(
        &app,
        "POST",
        "/api/users/",
        Some(json!({
            "name": "Flash",
            "email": "barry.allen@dc.com",
            "password": "speed_force",
            "team_id": "no-such-team",
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "bad_request");
}

#[tokio::test]
async fn test_activity_requires_existing_user() {
    let (app, _state) = create_test_app();

    let response = send(
        &app,
        "POST",
        "/api/activities/",
        Some(json!({
            "user_id": "ghost",
            "activity_type": "Running",
            "duration": 30,
            "calories": 300,
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_activity_lifecycle() {
    let (app, _state) = create_test_app();
    let user = create(
        &app,
        "/api/users/",
        json!({ "name": "Thor", "email": "thor.odinson@marvel.com", "password": "mjolnir_worthy" }),
    )
    .await;

    let activity = create(
        &app,
        "/api/activities/",
        json!({
            "user_id": user["id"],
            "activity_type": "Cycling",
            "duration": 60,
            "calories": 540,
            "distance": 12.5,
        }),
    )
    .await;
    assert_eq!(activity["distance"], 12.5);
    assert!(activity["notes"].is_null());

    let id = activity["id"].as_str().unwrap();
    let response = send(
        &app,
        "PATCH",
        &format!("/api/activities/{}/", id),
        Some(json!({ "distance": null, "notes": "Rainbow Bridge loop" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let patched = json_body(response).await;
    assert!(patched["distance"].is_null());
    assert_eq!(patched["notes"], "Rainbow Bridge loop");
    assert_eq!(patched["calories"], 540);

    let response = send(
        &app,
        "PATCH",
        &format!("/api/activities/{}/", id),
        Some(json!({ "distance": -1.0 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_team_members_count() {
    let (app, _state) = create_test_app();
    let team_id = create_team(&app, "Team DC").await;
    let other_id = create_team(&app, "Team Marvel").await;

    for (name, email) in [("Superman", "clark.kent@dc.com"), ("Batman", "bruce.wayne@dc.com")] {
        create(
            &app,
            "/api/users/",
            json!({ "name": name, "email": email, "password": "pw", "team_id": team_id }),
        )
        .await;
    }

    let response = send(&app, "GET", &format!("/api/teams/{}/", team_id), None).await;
    assert_eq!(json_body(response).await["members_count"], 2);

    let response = send(&app, "GET", "/api/teams/", None).await;
    let teams = json_body(response).await;
    assert_eq!(teams[0]["id"], team_id.as_str());
    assert_eq!(teams[0]["members_count"], 2);
    assert_eq!(teams[1]["id"], other_id.as_str());
    assert_eq!(teams[1]["members_count"], 0);
}

#[tokio::test]
async fn test_deleting_team_leaves_members() {
    let (app, state) = create_test_app();
    let team_id = create_team(&app, "Team Marvel").await;
    let user = create(
        &app,
        "/api/users/",
        json!({ "name": "Hulk", "email": "bruce.banner@marvel.com", "password": "gamma", "team_id": team_id }),
    )
    .await;

    let response = send(&app, "DELETE", &format!("/api/teams/{}/", team_id), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let stored: octofit_tracker::models::User =
        state.db.require(user["id"].as_str().unwrap()).await.unwrap();
    assert_eq!(stored.team_id.unwrap().as_str(), team_id);
}

#[tokio::test]
async fn test_leaderboard_listed_by_rank() {
    let (app, _state) = create_test_app();
    let marvel = create_team(&app, "Team Marvel").await;
    let dc = create_team(&app, "Team DC").await;

    create(
        &app,
        "/api/leaderboard/",
        json!({ "team_id": marvel, "total_calories": 900, "total_activities": 3, "rank": 2 }),
    )
    .await;
    create(
        &app,
        "/api/leaderboard/",
        json!({ "team_id": dc, "total_calories": 1200, "total_activities": 4, "rank": 1 }),
    )
    .await;

    let response = send(&app, "GET", "/api/leaderboard/", None).await;
    let entries = json_body(response).await;
    assert_eq!(entries[0]["team_id"], dc.as_str());
    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[1]["team_id"], marvel.as_str());

    let response = send(
        &app,
        "POST",
        "/api/leaderboard/",
        Some(json!({ "team_id": "missing", "rank": 3 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_workout_replace_and_validation() {
    let (app, _state) = create_test_app();
    let workout = create(
        &app,
        "/api/workouts/",
        json!({
            "name": "Speed Force Sprints",
            "description": "Intervals",
            "difficulty": "intermediate",
            "duration": 30,
            "calories_estimate": 400,
            "category": "cardio",
        }),
    )
    .await;
    let id = workout["id"].as_str().unwrap();

    let response = send(
        &app,
        "PUT",
        &format!("/api/workouts/{}/", id),
        Some(json!({
            "name": "Speed Force Sprints",
            "description": "Longer intervals",
            "difficulty": "advanced",
            "duration": 40,
            "calories_estimate": 520,
            "category": "cardio",
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let replaced = json_body(response).await;
    assert_eq!(replaced["difficulty"], "advanced");
    assert_eq!(replaced["created_at"], workout["created_at"]);

    let response = send(
        &app,
        "PATCH",
        &format!("/api/workouts/{}/", id),
        Some(json!({ "name": "" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_ids_not_found() {
    let (app, _state) = create_test_app();

    for collection in ["users", "teams", "activities", "leaderboard", "workouts"] {
        let response = send(&app, "GET", &format!("/api/{}/missing/", collection), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", collection);

        let response = send(&app, "DELETE", &format!("/api/{}/missing/", collection), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", collection);
    }
}
