// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public sticker lookup, reached by scanning a vehicle sticker.
//!
//! Only what a passer-by needs to help in an emergency is exposed. The
//! emergency contact number is released only through the explicit
//! emergency action, which also alerts the admins.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::Result;
use crate::models::{BloodGroup, NotificationKind, Rider};
use crate::time_utils::format_display_date;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/public/sticker/{code}", get(get_sticker_profile))
        .route("/public/sticker/{code}/emergency", post(trigger_emergency))
}

/// Public view of a rider.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PublicRiderProfile {
    pub full_name: String,
    pub blood_group: BloodGroup,
    pub sticker_code: String,
    pub vehicle_registration: String,
    pub vehicle_brand: String,
    pub vehicle_model: String,
}

impl PublicRiderProfile {
    fn from_rider(rider: &Rider, code: &str) -> Self {
        Self {
            full_name: rider.full_name.clone(),
            blood_group: rider.blood_group,
            sticker_code: rider
                .sticker_code
                .clone()
                .unwrap_or_else(|| code.trim().to_uppercase()),
            vehicle_registration: rider.vehicle.registration_number.clone(),
            vehicle_brand: rider.vehicle.brand.clone(),
            vehicle_model: rider.vehicle.model.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EmergencyResponse {
    pub full_name: String,
    pub emergency_contact_phone: String,
    pub blood_group: BloodGroup,
    pub alert_sent: bool,
}

async fn get_sticker_profile(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<PublicRiderProfile>> {
    let rider = state.directory.rider_by_sticker_code(&code)?;
    tracing::info!(rider_id = %rider.id, "Sticker scanned");
    Ok(Json(PublicRiderProfile::from_rider(&rider, &code)))
}

/// Release the emergency contact and alert the admins.
async fn trigger_emergency(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<EmergencyResponse>> {
    let rider = state.directory.rider_by_sticker_code(&code)?;
    let now = Utc::now();

    tracing::warn!(rider_id = %rider.id, "Emergency triggered from sticker");
    state.notifications.push(
        NotificationKind::Emergency,
        "Emergency Alert",
        format!(
            "Emergency alert triggered from sticker {} for rider {} on {}. Contact required immediately.",
            code.trim().to_uppercase(),
            rider.full_name,
            format_display_date(now.date_naive())
        ),
        now,
    );

    Ok(Json(EmergencyResponse {
        full_name: rider.full_name,
        emergency_contact_phone: rider.emergency_contact_phone,
        blood_group: rider.blood_group,
        alert_sent: true,
    }))
}
