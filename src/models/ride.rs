// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Club ride/event model.

use crate::time_utils::deserialize_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A club ride. Participants reference riders by ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RideEvent {
    pub id: String,
    pub title: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    /// Ride distance in kilometres
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub participant_rider_ids: Vec<String>,
}

impl RideEvent {
    pub fn has_participant(&self, rider_id: &str) -> bool {
        self.participant_rider_ids.iter().any(|id| id == rider_id)
    }
}
