// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rider export to comma-separated text for spreadsheets.
//!
//! Format: one header row of column labels, then one row per rider. Every
//! field is wrapped in double quotes with embedded quotes doubled, fields
//! are joined by `,` and rows by `\n` (no trailing newline).

use crate::error::{AppError, Result};
use crate::models::Rider;
use crate::services::directory::{compute_activity_status, compute_age};
use chrono::NaiveDate;
use std::str::FromStr;

/// Columns available in an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportColumn {
    Id,
    FullName,
    PhoneNumber,
    DateOfBirth,
    Age,
    BloodGroup,
    EmergencyContact,
    VehicleRegistration,
    VehicleBrand,
    VehicleModel,
    JoinDate,
    Anniversary,
    TotalRides,
    LastRideDate,
    Status,
    StickerCode,
    Notes,
}

/// Columns exported when the caller does not choose.
pub const DEFAULT_COLUMNS: [ExportColumn; 14] = [
    ExportColumn::Id,
    ExportColumn::FullName,
    ExportColumn::PhoneNumber,
    ExportColumn::DateOfBirth,
    ExportColumn::BloodGroup,
    ExportColumn::EmergencyContact,
    ExportColumn::VehicleRegistration,
    ExportColumn::VehicleBrand,
    ExportColumn::VehicleModel,
    ExportColumn::JoinDate,
    ExportColumn::TotalRides,
    ExportColumn::LastRideDate,
    ExportColumn::Status,
    ExportColumn::Notes,
];

impl ExportColumn {
    /// Header label.
    pub fn label(&self) -> &'static str {
        match self {
            ExportColumn::Id => "ID",
            ExportColumn::FullName => "Full Name",
            ExportColumn::PhoneNumber => "Phone Number",
            ExportColumn::DateOfBirth => "Date of Birth",
            ExportColumn::Age => "Age",
            ExportColumn::BloodGroup => "Blood Group",
            ExportColumn::EmergencyContact => "Emergency Contact",
            ExportColumn::VehicleRegistration => "Vehicle Registration",
            ExportColumn::VehicleBrand => "Vehicle Brand",
            ExportColumn::VehicleModel => "Vehicle Model",
            ExportColumn::JoinDate => "Join Date",
            ExportColumn::Anniversary => "Anniversary",
            ExportColumn::TotalRides => "Total Rides",
            ExportColumn::LastRideDate => "Last Ride Date",
            ExportColumn::Status => "Status",
            ExportColumn::StickerCode => "Sticker Code",
            ExportColumn::Notes => "Notes",
        }
    }

    /// Field value for one rider. Status and age are derived from `now`.
    ///
    /// Age is left blank when it cannot be derived.
    fn value(&self, rider: &Rider, now: NaiveDate) -> String {
        match self {
            ExportColumn::Id => rider.id.clone(),
            ExportColumn::FullName => rider.full_name.clone(),
            ExportColumn::PhoneNumber => rider.phone_number.clone(),
            ExportColumn::DateOfBirth => rider.date_of_birth.to_string(),
            ExportColumn::Age => compute_age(rider.date_of_birth, now)
                .map(|age| age.to_string())
                .unwrap_or_default(),
            ExportColumn::BloodGroup => rider.blood_group.to_string(),
            ExportColumn::EmergencyContact => rider.emergency_contact_phone.clone(),
            ExportColumn::VehicleRegistration => rider.vehicle.registration_number.clone(),
            ExportColumn::VehicleBrand => rider.vehicle.brand.clone(),
            ExportColumn::VehicleModel => rider.vehicle.model.clone(),
            ExportColumn::JoinDate => rider.join_date.to_string(),
            ExportColumn::Anniversary => rider
                .anniversary_date
                .map(|date| date.to_string())
                .unwrap_or_default(),
            ExportColumn::TotalRides => rider.total_ride_count.to_string(),
            ExportColumn::LastRideDate => rider.last_activity_date.to_string(),
            ExportColumn::Status => compute_activity_status(rider, now).as_str().to_string(),
            ExportColumn::StickerCode => rider.sticker_code.clone().unwrap_or_default(),
            ExportColumn::Notes => rider.notes.clone().unwrap_or_default(),
        }
    }
}

impl FromStr for ExportColumn {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let column = match s.trim() {
            "id" => ExportColumn::Id,
            "full_name" => ExportColumn::FullName,
            "phone_number" => ExportColumn::PhoneNumber,
            "date_of_birth" => ExportColumn::DateOfBirth,
            "age" => ExportColumn::Age,
            "blood_group" => ExportColumn::BloodGroup,
            "emergency_contact" => ExportColumn::EmergencyContact,
            "vehicle_registration" => ExportColumn::VehicleRegistration,
            "vehicle_brand" => ExportColumn::VehicleBrand,
            "vehicle_model" => ExportColumn::VehicleModel,
            "join_date" => ExportColumn::JoinDate,
            "anniversary" => ExportColumn::Anniversary,
            "total_rides" => ExportColumn::TotalRides,
            "last_ride_date" => ExportColumn::LastRideDate,
            "status" => ExportColumn::Status,
            "sticker_code" => ExportColumn::StickerCode,
            "notes" => ExportColumn::Notes,
            other => {
                return Err(AppError::Validation(format!(
                    "Unknown export column '{}'",
                    other
                )))
            }
        };
        Ok(column)
    }
}

/// Parse a comma-separated column list ("id,full_name,status").
///
/// `None` or an empty list selects [`DEFAULT_COLUMNS`].
pub fn parse_columns(raw: Option<&str>) -> Result<Vec<ExportColumn>> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(DEFAULT_COLUMNS.to_vec());
    };

    raw.split(',').map(ExportColumn::from_str).collect()
}

/// Quote one field: wrap in `"` and double any embedded `"`.
fn quote_field(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' {
            quoted.push('"');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

fn join_row<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields
        .into_iter()
        .map(|field| quote_field(field.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Serialize riders as delimited text with the given columns.
pub fn export_riders_to_delimited_text(
    riders: &[Rider],
    columns: &[ExportColumn],
    now: NaiveDate,
) -> Result<String> {
    if columns.is_empty() {
        return Err(AppError::Validation(
            "At least one export column is required".to_string(),
        ));
    }

    let mut rows = Vec::with_capacity(riders.len() + 1);
    rows.push(join_row(columns.iter().map(ExportColumn::label)));

    for rider in riders {
        rows.push(join_row(
            columns.iter().map(|column| column.value(rider, now)),
        ));
    }

    Ok(rows.join("\n"))
}

/// Download file name for an export made on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("riders-export-{}.csv", date)
}
