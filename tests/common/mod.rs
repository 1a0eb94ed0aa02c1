// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::response::Response;
use chrono::{Duration, NaiveDate};
use rider_directory::config::Config;
use rider_directory::db::Dataset;
use rider_directory::models::{BloodGroup, Club, RideEvent, Rider, Vehicle};
use rider_directory::routes::create_router;
use rider_directory::time_utils::today;
use rider_directory::AppState;
use std::sync::Arc;

/// A rider with only the fields the directory cares about set.
#[allow(dead_code)]
pub fn rider(
    id: &str,
    full_name: &str,
    phone_number: &str,
    date_of_birth: NaiveDate,
    last_activity_date: NaiveDate,
) -> Rider {
    Rider {
        id: id.to_string(),
        full_name: full_name.to_string(),
        phone_number: phone_number.to_string(),
        emergency_contact_phone: format!("+91 90000 {}", &id[1..]),
        date_of_birth,
        join_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        last_activity_date,
        anniversary_date: None,
        blood_group: BloodGroup::OPositive,
        vehicle: Vehicle {
            registration_number: format!("MH12 AB {}", &id[1..]),
            brand: "Royal Enfield".to_string(),
            model: "Classic 350".to_string(),
            puc_expiry: None,
            insurance_expiry: None,
        },
        total_ride_count: 3,
        verification_checklist: None,
        sticker_code: Some(format!("STK{}", &id[1..])),
        notes: None,
    }
}

#[allow(dead_code)]
pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

/// Small club relative to today: R001-R003 active, R004-R005 inactive.
#[allow(dead_code)]
pub fn fixture_dataset() -> Dataset {
    let now = today();
    let recent = now - Duration::days(5);
    let stale = now - Duration::days(120);

    let riders = vec![
        rider("R001", "Aarav Sharma", "+91 98100 04321", date("1990-03-14"), recent),
        rider("R002", "Priya Nair", "+91 98110 04328", date("1988-07-02"), recent),
        rider("R003", "Rohan Mehta", "+91 98120 04335", date("1995-11-23"), recent),
        rider("R004", "Ananya Iyer", "+91 98130 04342", date("1992-01-09"), stale),
        rider("R005", "Vikram Singh", "+91 98140 04349", date("1984-02-29"), stale),
    ];

    let rides = vec![
        RideEvent {
            id: "E001".to_string(),
            title: "Sunrise Ride".to_string(),
            date: recent,
            distance_km: Some(62.5),
            participant_rider_ids: vec!["R001".to_string(), "R002".to_string()],
        },
        RideEvent {
            id: "E002".to_string(),
            title: "Coastal Tour".to_string(),
            date: stale,
            distance_km: Some(412.3),
            participant_rider_ids: vec!["R001".to_string(), "R004".to_string()],
        },
    ];

    let clubs = vec![Club {
        id: "C001".to_string(),
        name: "Pune Road Riders".to_string(),
        location: "Pune".to_string(),
        member_rider_ids: vec!["R001".to_string(), "R002".to_string(), "R004".to_string()],
        total_ride_count: 12,
        active_rider_count: 2,
    }];

    Dataset {
        riders,
        rides,
        clubs,
        notifications: Vec::new(),
    }
}

/// Create a test app over the fixture dataset.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_config(Config::default())
}

#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::from_dataset(config, fixture_dataset()));
    (create_router(state.clone()), state)
}

/// Create a valid session token for testing.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    rider_directory::middleware::auth::create_jwt(user_id, signing_key).unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Read a response body as text.
#[allow(dead_code)]
pub async fn body_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}
