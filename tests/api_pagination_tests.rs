// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rider listing API tests.
//!
//! These tests verify that:
//! 1. Pagination and filter parameters are validated
//! 2. Listing, export and detail endpoints return derived values

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Duration;
use rider_directory::config::Config;
use rider_directory::routes::create_router;
use rider_directory::time_utils::today;
use rider_directory::AppState;
use std::sync::Arc;
use tower::ServiceExt;

mod common;

async fn get(app: Router, token: &str, uri: &str) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_invalid_paging_rejected() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("1", &state.config.jwt_signing_key);

    for uri in [
        "/api/riders?page=0&per_page=10",
        "/api/riders?page=1&per_page=0",
        "/api/riders?page=1&per_page=101",
        "/api/riders?status=sleeping",
        "/api/riders?birth_month=13",
        "/api/riders?birth_month=0",
    ] {
        let response = get(app.clone(), &token, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn test_overlong_search_rejected() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("1", &state.config.jwt_signing_key);

    let uri = format!("/api/riders?search={}", "a".repeat(101));
    let response = get(app, &token, &uri).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_list_riders_paginates() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("1", &state.config.jwt_signing_key);

    let response = get(app, &token, "/api/riders?page=2&per_page=2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = common::body_json(response).await;
    assert_eq!(json["total_matching"], 5);
    assert_eq!(json["total_pages"], 3);
    assert_eq!(json["page"], 2);
    let ids: Vec<&str> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["R003", "R004"]);
}

#[tokio::test]
async fn test_list_riders_status_filter() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("1", &state.config.jwt_signing_key);

    let response = get(app, &token, "/api/riders?status=inactive").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = common::body_json(response).await;
    assert_eq!(json["total_matching"], 2);
    for item in json["items"].as_array().unwrap() {
        assert_eq!(item["activity_status"], "inactive");
        assert!(item["age"].as_u64().is_some());
    }
}

#[tokio::test]
async fn test_rider_born_after_today_does_not_break_listing() {
    let mut dataset = common::fixture_dataset();
    let now = today();
    dataset.riders.push(common::rider(
        "R006",
        "Future Rider",
        "+91 98000 00006",
        now + Duration::days(400),
        now,
    ));
    let state = Arc::new(AppState::from_dataset(Config::default(), dataset));
    let app = create_router(state.clone());
    let token = common::create_test_jwt("1", &state.config.jwt_signing_key);

    let response = get(app.clone(), &token, "/api/riders?page=1&per_page=10").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["total_matching"], 6);
    let items = json["items"].as_array().unwrap();
    assert!(items[0]["age"].as_u64().is_some());
    assert!(items[5]["age"].is_null());

    let response = get(app.clone(), &token, "/api/riders/R006").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, &token, "/api/riders/export?columns=id,age").await;
    assert_eq!(response.status(), StatusCode::OK);
    let text = common::body_text(response).await;
    assert!(text.ends_with("\"R006\",\"\""));
}

#[tokio::test]
async fn test_list_riders_search_is_case_insensitive() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("1", &state.config.jwt_signing_key);

    let response = get(app, &token, "/api/riders?search=PRIYA").await;
    let json = common::body_json(response).await;

    assert_eq!(json["total_matching"], 1);
    assert_eq!(json["items"][0]["full_name"], "Priya Nair");
}

#[tokio::test]
async fn test_list_riders_no_match() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("1", &state.config.jwt_signing_key);

    let response = get(app, &token, "/api/riders?search=zzz").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = common::body_json(response).await;
    assert_eq!(json["total_matching"], 0);
    assert_eq!(json["total_pages"], 0);
    assert!(json["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_export_returns_csv_attachment() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("1", &state.config.jwt_signing_key);

    let response = get(
        app,
        &token,
        "/api/riders/export?status=active&columns=id,full_name,status",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/csv; charset=utf-8"
    );
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"riders-export-"));
    assert!(disposition.ends_with(".csv\""));

    let text = common::body_text(response).await;
    let lines: Vec<&str> = text.split('\n').collect();
    assert_eq!(
        lines,
        vec![
            "\"ID\",\"Full Name\",\"Status\"",
            "\"R001\",\"Aarav Sharma\",\"active\"",
            "\"R002\",\"Priya Nair\",\"active\"",
            "\"R003\",\"Rohan Mehta\",\"active\"",
        ]
    );
}

#[tokio::test]
async fn test_export_unknown_column_rejected() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("1", &state.config.jwt_signing_key);

    let response = get(app, &token, "/api/riders/export?columns=id,favourite_colour").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rider_detail_includes_rides() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("1", &state.config.jwt_signing_key);

    let response = get(app, &token, "/api/riders/R001").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = common::body_json(response).await;
    assert_eq!(json["id"], "R001");
    assert_eq!(json["activity_status"], "active");
    let rides: Vec<&str> = json["rides"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(rides, vec!["E001", "E002"]);
}

#[tokio::test]
async fn test_rider_detail_not_found() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("1", &state.config.jwt_signing_key);

    let response = get(app, &token, "/api/riders/R999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = common::body_json(response).await;
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn test_update_notes_then_list_reflects_change() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("1", &state.config.jwt_signing_key);

    // Warm the cache first
    let before = get(app.clone(), &token, "/api/riders?search=Rohan").await;
    let before = common::body_json(before).await;
    assert!(before["items"][0]["notes"].is_null());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/riders/R003/notes")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"notes":"  Prefers weekend rides.  "}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["notes"], "Prefers weekend rides.");

    let after = get(app, &token, "/api/riders?search=Rohan").await;
    let after = common::body_json(after).await;
    assert_eq!(after["items"][0]["notes"], "Prefers weekend rides.");
}

#[tokio::test]
async fn test_update_checklist() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/riders/R002/checklist")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"gear_verified":true,"documents_submitted":false}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["verification_checklist"]["gear_verified"], true);
    assert_eq!(json["verification_checklist"]["documents_submitted"], false);
}

#[tokio::test]
async fn test_dashboard_and_clubs() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("1", &state.config.jwt_signing_key);

    let response = get(app.clone(), &token, "/api/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["total_members"], 5);
    assert_eq!(json["total_rides"], 2);
    assert_eq!(json["active_riders"], 3);
    assert_eq!(json["inactive_riders"], 2);
    assert_eq!(json["participation_rate"], 60.0);

    let response = get(app.clone(), &token, "/api/clubs").await;
    let json = common::body_json(response).await;
    assert_eq!(json[0]["member_count"], 3);
    assert_eq!(json[0]["inactive_riders"], 1);

    let response = get(app, &token, "/api/clubs/C404").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upcoming_window_validated() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("1", &state.config.jwt_signing_key);

    let response = get(app.clone(), &token, "/api/events/upcoming?days=367").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(app, &token, "/api/events/upcoming?days=366").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    // Every fixture birthday falls within a year
    assert_eq!(json.as_array().unwrap().len(), 5);
}
