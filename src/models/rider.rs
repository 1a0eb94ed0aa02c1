// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rider (club member) model.

use crate::time_utils::{deserialize_date, deserialize_optional_date};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A club member as stored in the dataset.
///
/// Values that depend on the current date (activity status, age) are not
/// stored here; see `services::directory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Rider {
    /// Unique rider ID (e.g. "R001")
    pub id: String,
    pub full_name: String,
    pub phone_number: String,
    pub emergency_contact_phone: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date_of_birth: NaiveDate,
    /// Date the rider joined the club
    #[serde(deserialize_with = "deserialize_date")]
    pub join_date: NaiveDate,
    /// Most recent ride the rider took part in
    #[serde(deserialize_with = "deserialize_date")]
    pub last_activity_date: NaiveDate,
    /// Wedding anniversary, if the rider shared it
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub anniversary_date: Option<NaiveDate>,
    pub blood_group: BloodGroup,
    pub vehicle: Vehicle,
    #[serde(default)]
    pub total_ride_count: u32,
    #[serde(default)]
    pub verification_checklist: Option<VerificationChecklist>,
    /// Public code printed on the vehicle sticker
    #[serde(default)]
    pub sticker_code: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Rider's registered vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Vehicle {
    pub registration_number: String,
    pub brand: String,
    pub model: String,
    /// Pollution-under-control certificate expiry
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub puc_expiry: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub insurance_expiry: Option<NaiveDate>,
}

/// Admin verification checklist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct VerificationChecklist {
    pub gear_verified: bool,
    pub documents_submitted: bool,
}

/// ABO/Rh blood group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }
}

impl std::fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived active/inactive classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Active,
    Inactive,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Active => "active",
            ActivityStatus::Inactive => "inactive",
        }
    }
}
