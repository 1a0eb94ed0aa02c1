// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Headline numbers for the admin dashboard.

use crate::error::Result;
use crate::models::{ActivityStatus, RideEvent, Rider, UpcomingEvent};
use crate::services::directory::{compute_activity_status, upcoming_events};
use chrono::NaiveDate;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Dashboard summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardStats {
    pub total_members: u32,
    pub total_rides: u32,
    /// Rode within the activity window
    pub active_riders: u32,
    pub inactive_riders: u32,
    /// Percentage of active members, one decimal place
    pub participation_rate: f64,
    pub upcoming_events: Vec<UpcomingEvent>,
}

/// Compute dashboard stats against `now`.
pub fn dashboard_stats(
    riders: &[Rider],
    rides: &[RideEvent],
    now: NaiveDate,
    window_days: u32,
) -> Result<DashboardStats> {
    let total_members = riders.len() as u32;
    let active_riders = riders
        .iter()
        .filter(|rider| compute_activity_status(rider, now) == ActivityStatus::Active)
        .count() as u32;

    Ok(DashboardStats {
        total_members,
        total_rides: rides.len() as u32,
        active_riders,
        inactive_riders: total_members - active_riders,
        participation_rate: participation_rate(active_riders, total_members),
        upcoming_events: upcoming_events(riders, now, window_days)?,
    })
}

fn participation_rate(active: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = f64::from(active) * 100.0 / f64::from(total);
    (percent * 10.0).round() / 10.0
}
