// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON dataset loading and validation.

use crate::error::AppError;
use crate::models::{Club, Notification, RideEvent, Rider};
use crate::time_utils::today;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Everything the service starts with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub riders: Vec<Rider>,
    #[serde(default)]
    pub rides: Vec<RideEvent>,
    #[serde(default)]
    pub clubs: Vec<Club>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

impl Dataset {
    /// Load and validate a dataset from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| DatasetError::Io(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load and validate a dataset from a JSON string.
    pub fn load_from_json(json_data: &str) -> Result<Self, DatasetError> {
        let dataset: Dataset = serde_json::from_str(json_data).map_err(DatasetError::from_json)?;
        dataset.validate()?;

        tracing::info!(
            riders = dataset.riders.len(),
            rides = dataset.rides.len(),
            clubs = dataset.clubs.len(),
            notifications = dataset.notifications.len(),
            "Loaded dataset"
        );
        Ok(dataset)
    }

    /// Check the cross-record invariants serde cannot express.
    pub fn validate(&self) -> Result<(), DatasetError> {
        self.validate_as_of(today())
    }

    /// [`Dataset::validate`] against an explicit current date.
    pub fn validate_as_of(&self, now: NaiveDate) -> Result<(), DatasetError> {
        let mut rider_ids = HashSet::new();
        let mut sticker_codes = HashSet::new();

        for rider in &self.riders {
            if !rider_ids.insert(rider.id.as_str()) {
                return Err(DatasetError::Invalid(format!(
                    "duplicate rider id {}",
                    rider.id
                )));
            }

            if rider.date_of_birth > now {
                return Err(DatasetError::Invalid(format!(
                    "rider {} has date of birth {} after {}",
                    rider.id, rider.date_of_birth, now
                )));
            }

            if let Some(code) = &rider.sticker_code {
                let normalized = code.trim().to_ascii_uppercase();
                if normalized.is_empty() {
                    return Err(DatasetError::Invalid(format!(
                        "rider {} has a blank sticker code",
                        rider.id
                    )));
                }
                if !sticker_codes.insert(normalized) {
                    return Err(DatasetError::Invalid(format!(
                        "sticker code {} is used by more than one rider",
                        code
                    )));
                }
            }
        }

        for ride in &self.rides {
            if let Some(distance) = ride.distance_km {
                if !(distance > 0.0) {
                    return Err(DatasetError::Invalid(format!(
                        "ride {} has non-positive distance {}",
                        ride.id, distance
                    )));
                }
            }

            let unknown = ride
                .participant_rider_ids
                .iter()
                .filter(|id| !rider_ids.contains(id.as_str()))
                .count();
            if unknown > 0 {
                tracing::warn!(
                    ride_id = %ride.id,
                    unknown,
                    "Ride references riders that are not in the dataset"
                );
            }
        }

        for club in &self.clubs {
            if club.active_rider_count > club.member_count() {
                return Err(DatasetError::Invalid(format!(
                    "club {} has {} active riders but only {} members",
                    club.id,
                    club.active_rider_count,
                    club.member_count()
                )));
            }
        }

        Ok(())
    }
}

/// Errors from dataset loading.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to read dataset: {0}")]
    Io(String),

    #[error("Failed to parse dataset: {0}")]
    Parse(String),

    #[error("Invalid date in dataset: {0}")]
    InvalidDate(String),

    #[error("Invalid dataset: {0}")]
    Invalid(String),
}

impl DatasetError {
    /// Classify a JSON error, keeping malformed dates apart from other
    /// parse failures.
    fn from_json(e: serde_json::Error) -> Self {
        let message = e.to_string();
        let marker = AppError::InvalidDate(String::new()).to_string();
        if e.is_data() && message.starts_with(&marker) {
            DatasetError::InvalidDate(message[marker.len()..].to_string())
        } else {
            DatasetError::Parse(message)
        }
    }
}
