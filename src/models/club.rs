// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Club model.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A riding club.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub member_rider_ids: Vec<String>,
    #[serde(default)]
    pub total_ride_count: u32,
    /// Never more than the number of members
    #[serde(default)]
    pub active_rider_count: u32,
}

impl Club {
    pub fn member_count(&self) -> u32 {
        self.member_rider_ids.len() as u32
    }
}

/// Club with derived member counts for the clubs page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ClubSummary {
    pub id: String,
    pub name: String,
    pub location: String,
    pub member_count: u32,
    pub total_ride_count: u32,
    pub active_riders: u32,
    pub inactive_riders: u32,
}

impl From<&Club> for ClubSummary {
    fn from(club: &Club) -> Self {
        let member_count = club.member_count();
        Self {
            id: club.id.clone(),
            name: club.name.clone(),
            location: club.location.clone(),
            member_count,
            total_ride_count: club.total_ride_count,
            active_riders: club.active_rider_count,
            inactive_riders: member_count.saturating_sub(club.active_rider_count),
        }
    }
}
