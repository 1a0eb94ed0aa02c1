// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for calendar dates.
//!
//! Everything in the directory works on date-only values (`NaiveDate`).
//! Months are always human month numbers (1-12) carried as `chrono::Month`.

use crate::error::{AppError, Result};
use chrono::{Datelike, Month, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's date in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| AppError::InvalidDate(format!("'{}' is not a YYYY-MM-DD date", raw)))
}

/// Deserialize a `YYYY-MM-DD` field through [`parse_date`].
///
/// Use with `#[serde(deserialize_with = "...")]` so a bad value surfaces
/// as an invalid-date error naming the offending text.
pub fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

/// Optional variant of [`deserialize_date`]; pair with `#[serde(default)]`.
pub fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_date(&raw).map_err(serde::de::Error::custom))
        .transpose()
}

/// Format a date as `DD/MM/YYYY` for display.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Whole days from `from` to `to` (negative if `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Parse a 1-based month number ("1".."12").
pub fn parse_month(raw: &str) -> Result<Month> {
    let invalid = || AppError::Validation(format!("Month must be 1-12, got '{}'", raw));
    let number: u8 = raw.trim().parse().map_err(|_| invalid())?;
    if number == 0 {
        return Err(invalid());
    }
    Month::try_from(number).map_err(|_| invalid())
}

/// The month a date falls in.
pub fn month_of(date: NaiveDate) -> Month {
    // month() is always 1..=12
    Month::try_from(date.month() as u8).unwrap_or(Month::January)
}

/// The occurrence of `date`'s month/day in `year`.
///
/// Feb 29 falls on Feb 28 in non-leap years.
pub fn occurrence_in_year(date: NaiveDate, year: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| {
            if date.month() == 2 && date.day() == 29 {
                NaiveDate::from_ymd_opt(year, 2, 28)
            } else {
                None
            }
        })
        .ok_or_else(|| {
            AppError::InvalidDate(format!("{} has no occurrence in year {}", date, year))
        })
}

/// The next occurrence of `date`'s month/day on or after `now`.
pub fn next_occurrence(date: NaiveDate, now: NaiveDate) -> Result<NaiveDate> {
    let this_year = occurrence_in_year(date, now.year())?;
    if this_year < now {
        occurrence_in_year(date, now.year() + 1)
    } else {
        Ok(this_year)
    }
}
