// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rider directory: derived rider state, filtered/paginated queries,
//! upcoming events and ride history.
//!
//! The free functions are pure: they take the collections and "now" as
//! arguments and never read the clock or mutate their inputs.
//! [`DirectoryService`] wires them to a [`Repository`] and caches query pages.

use crate::db::Repository;
use crate::error::{AppError, Result};
use crate::models::{
    ActivityStatus, Club, ClubSummary, EventKind, RideEvent, Rider, SpecialEvent, UpcomingEvent,
    VerificationChecklist,
};
use crate::time_utils::{days_between, month_of, next_occurrence, occurrence_in_year, parse_month};
use chrono::{Datelike, Month, NaiveDate};
use dashmap::DashMap;
use serde::Serialize;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A rider is active if their last ride is at most this many days ago.
pub const ACTIVE_WINDOW_DAYS: i64 = 60;

/// Longest notes an admin can save on a rider.
pub const MAX_NOTES_CHARS: usize = 2000;

/// Cached query pages before the cache is flushed.
const MAX_CACHED_QUERIES: usize = 256;

// ─── Filters ─────────────────────────────────────────────────

/// Restrict riders by derived activity status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    fn accepts(&self, status: ActivityStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == ActivityStatus::Active,
            StatusFilter::Inactive => status == ActivityStatus::Inactive,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" | "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "inactive" => Ok(StatusFilter::Inactive),
            other => Err(AppError::Validation(format!(
                "Status must be all, active or inactive, got '{}'",
                other
            ))),
        }
    }
}

/// Restrict riders by the calendar month of their birth date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BirthMonthFilter {
    #[default]
    All,
    Month(Month),
}

impl FromStr for BirthMonthFilter {
    type Err = AppError;

    /// Accepts "all" or a human month number "1".."12".
    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" | "all" => Ok(BirthMonthFilter::All),
            number => parse_month(number).map(BirthMonthFilter::Month),
        }
    }
}

/// Conjunctive rider filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RiderFilter {
    /// Case-insensitive substring of full name or phone number
    pub search_text: Option<String>,
    pub status: StatusFilter,
    pub birth_month: BirthMonthFilter,
}

impl RiderFilter {
    /// Lowercased search text, or `None` if there is nothing to search for.
    fn search_needle(&self) -> Option<String> {
        self.search_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase)
    }

    /// Whether `rider` passes every filter.
    pub fn matches(&self, rider: &Rider, now: NaiveDate) -> bool {
        self.matches_with(rider, self.search_needle().as_deref(), now)
    }

    fn matches_with(&self, rider: &Rider, needle: Option<&str>, now: NaiveDate) -> bool {
        if let Some(needle) = needle {
            let hit = rider.full_name.to_lowercase().contains(needle)
                || rider.phone_number.to_lowercase().contains(needle);
            if !hit {
                return false;
            }
        }

        if !self.status.accepts(compute_activity_status(rider, now)) {
            return false;
        }

        match self.birth_month {
            BirthMonthFilter::All => true,
            BirthMonthFilter::Month(month) => month_of(rider.date_of_birth) == month,
        }
    }
}

// ─── Pagination ──────────────────────────────────────────────

/// A validated 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Result<Self> {
        if page < 1 {
            return Err(AppError::Validation(
                "Page must be greater than 0".to_string(),
            ));
        }
        if page_size < 1 {
            return Err(AppError::Validation(
                "Page size must be greater than 0".to_string(),
            ));
        }
        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Index of the first item on this page, `None` on overflow.
    fn start_index(&self) -> Option<usize> {
        (self.page as usize - 1).checked_mul(self.page_size as usize)
    }
}

/// One page of results.
///
/// `total_pages` is 0 when nothing matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_matching: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Convert every item, keeping the paging metadata.
    pub fn map<U, F>(&self, f: F) -> Page<U>
    where
        F: FnMut(&T) -> U,
    {
        Page {
            items: self.items.iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_matching: self.total_matching,
            total_pages: self.total_pages,
        }
    }
}

// ─── Pure operations ─────────────────────────────────────────

/// Filter riders and return the requested page, in collection order.
pub fn query_riders(
    riders: &[Rider],
    filter: &RiderFilter,
    page: PageRequest,
    now: NaiveDate,
) -> Page<Rider> {
    let needle = filter.search_needle();
    let matching: Vec<&Rider> = riders
        .iter()
        .filter(|rider| filter.matches_with(rider, needle.as_deref(), now))
        .collect();

    let total_matching = matching.len();
    let page_size = page.page_size() as usize;
    let total_pages = total_matching.div_ceil(page_size);
    let start = page.start_index().unwrap_or(usize::MAX);

    let items = matching
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    Page {
        items,
        page: page.page(),
        page_size: page.page_size(),
        total_matching: total_matching as u32,
        total_pages: total_pages as u32,
    }
}

/// Active iff the last ride was at most [`ACTIVE_WINDOW_DAYS`] before `now`.
pub fn compute_activity_status(rider: &Rider, now: NaiveDate) -> ActivityStatus {
    if days_between(rider.last_activity_date, now) <= ACTIVE_WINDOW_DAYS {
        ActivityStatus::Active
    } else {
        ActivityStatus::Inactive
    }
}

/// Age in whole years on `now`.
///
/// Feb 29 birthdays count as Feb 28 in non-leap years.
pub fn compute_age(date_of_birth: NaiveDate, now: NaiveDate) -> Result<u32> {
    if date_of_birth > now {
        return Err(AppError::Validation(format!(
            "Date of birth {} is after {}",
            date_of_birth, now
        )));
    }

    let mut years = now.year() - date_of_birth.year();
    if now < occurrence_in_year(date_of_birth, now.year())? {
        years -= 1;
    }
    Ok(years as u32)
}

/// Birthdays and anniversaries occurring within `window_days` of `now`
/// (inclusive), soonest first. Ties keep rider order, birthday first.
pub fn upcoming_events(
    riders: &[Rider],
    now: NaiveDate,
    window_days: u32,
) -> Result<Vec<UpcomingEvent>> {
    let mut events = Vec::new();

    for rider in riders {
        let dates = [
            Some((EventKind::Birthday, rider.date_of_birth)),
            rider
                .anniversary_date
                .map(|date| (EventKind::Anniversary, date)),
        ];

        for (kind, date) in dates.into_iter().flatten() {
            let occurs_on = next_occurrence(date, now)?;
            let days_until = days_between(now, occurs_on);
            if days_until <= i64::from(window_days) {
                events.push(UpcomingEvent {
                    rider_id: rider.id.clone(),
                    rider_name: rider.full_name.clone(),
                    kind,
                    occurs_on,
                    days_until: days_until as u32,
                });
            }
        }
    }

    // sort_by_key is stable
    events.sort_by_key(|event| event.occurs_on);
    Ok(events)
}

/// Birthday or anniversary in `now`'s month, birthday taking precedence.
pub fn special_event_this_month(rider: &Rider, now: NaiveDate) -> Option<SpecialEvent> {
    let current = month_of(now);

    if month_of(rider.date_of_birth) == current {
        return Some(SpecialEvent {
            kind: EventKind::Birthday,
            day: rider.date_of_birth.day(),
        });
    }

    rider
        .anniversary_date
        .filter(|date| month_of(*date) == current)
        .map(|date| SpecialEvent {
            kind: EventKind::Anniversary,
            day: date.day(),
        })
}

/// Rides the rider took part in, in collection order.
pub fn rides_for_rider<'a>(rider_id: &str, rides: &'a [RideEvent]) -> Vec<&'a RideEvent> {
    rides
        .iter()
        .filter(|ride| ride.has_participant(rider_id))
        .collect()
}

/// Look up a rider by ID.
pub fn find_rider<'a>(riders: &'a [Rider], rider_id: &str) -> Result<&'a Rider> {
    riders
        .iter()
        .find(|rider| rider.id == rider_id)
        .ok_or_else(|| AppError::rider_not_found(rider_id))
}

/// Look up a rider by sticker code (trimmed, case-insensitive).
pub fn find_by_sticker_code<'a>(riders: &'a [Rider], code: &str) -> Result<&'a Rider> {
    let code = code.trim();
    if code.is_empty() {
        return Err(AppError::Validation(
            "Please enter a sticker code".to_string(),
        ));
    }

    riders
        .iter()
        .find(|rider| {
            rider
                .sticker_code
                .as_deref()
                .is_some_and(|sticker| sticker.trim().eq_ignore_ascii_case(code))
        })
        .ok_or_else(|| AppError::NotFound("No rider found with this sticker code".to_string()))
}

// ─── Derived views ───────────────────────────────────────────

/// Rider list row: the stored rider plus values derived from "now".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RiderSummary {
    #[serde(flatten)]
    pub rider: Rider,
    /// `None` when the stored birth date is after `now`
    pub age: Option<u32>,
    pub activity_status: ActivityStatus,
    pub special_event: Option<SpecialEvent>,
}

impl RiderSummary {
    pub fn build(rider: &Rider, now: NaiveDate) -> Self {
        let age = match compute_age(rider.date_of_birth, now) {
            Ok(age) => Some(age),
            Err(e) => {
                tracing::warn!(rider_id = %rider.id, error = %e, "Cannot derive rider age");
                None
            }
        };

        Self {
            rider: rider.clone(),
            age,
            activity_status: compute_activity_status(rider, now),
            special_event: special_event_this_month(rider, now),
        }
    }
}

/// Rider profile page: summary plus ride history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RiderDetail {
    #[serde(flatten)]
    pub summary: RiderSummary,
    pub rides: Vec<RideEvent>,
}

// ─── Service ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct QueryKey {
    revision: u64,
    filter: RiderFilter,
    page: PageRequest,
    now: NaiveDate,
}

/// Directory queries over a repository, with a per-revision page cache.
pub struct DirectoryService {
    repo: Arc<dyn Repository>,
    cache: DashMap<QueryKey, Arc<Page<Rider>>>,
    cached_revision: AtomicU64,
}

impl DirectoryService {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        let revision = repo.revision();
        Self {
            repo,
            cache: DashMap::new(),
            cached_revision: AtomicU64::new(revision),
        }
    }

    pub fn repository(&self) -> &Arc<dyn Repository> {
        &self.repo
    }

    /// Number of cached query pages.
    pub fn cached_queries(&self) -> usize {
        self.cache.len()
    }

    /// Drop cached pages computed against an older revision.
    ///
    /// The cached revision only moves forward, so a reader holding a stale
    /// revision never flushes pages computed against a newer one.
    fn sync_revision(&self, revision: u64) {
        let previous = self.cached_revision.fetch_max(revision, Ordering::AcqRel);
        if revision > previous {
            tracing::debug!(previous, revision, "Repository changed, clearing query cache");
            self.cache.clear();
        }
    }

    /// Filtered, paginated riders. Results are cached per
    /// `(revision, filter, page, now)`.
    pub fn query_riders(
        &self,
        filter: &RiderFilter,
        page: PageRequest,
        now: NaiveDate,
    ) -> Arc<Page<Rider>> {
        let revision = self.repo.revision();
        self.sync_revision(revision);

        let key = QueryKey {
            revision,
            filter: filter.clone(),
            page,
            now,
        };

        if let Some(hit) = self.cache.get(&key) {
            return hit.value().clone();
        }

        let riders = self.repo.riders();
        let result = Arc::new(query_riders(&riders, filter, page, now));

        if self.cache.len() >= MAX_CACHED_QUERIES {
            self.cache.clear();
        }
        self.cache.insert(key, result.clone());

        tracing::debug!(
            total_matching = result.total_matching,
            page = result.page,
            "Rider query computed"
        );
        result
    }

    /// Filtered, paginated rider list rows.
    pub fn list_riders(
        &self,
        filter: &RiderFilter,
        page: PageRequest,
        now: NaiveDate,
    ) -> Page<RiderSummary> {
        self.query_riders(filter, page, now)
            .map(|rider| RiderSummary::build(rider, now))
    }

    /// Rider profile with ride history.
    pub fn rider_detail(&self, rider_id: &str, now: NaiveDate) -> Result<RiderDetail> {
        let riders = self.repo.riders();
        let rider = find_rider(&riders, rider_id)?;
        let rides = self.repo.rides();

        Ok(RiderDetail {
            summary: RiderSummary::build(rider, now),
            rides: rides_for_rider(rider_id, &rides)
                .into_iter()
                .cloned()
                .collect(),
        })
    }

    /// Rider holding the given sticker code.
    pub fn rider_by_sticker_code(&self, code: &str) -> Result<Rider> {
        let riders = self.repo.riders();
        find_by_sticker_code(&riders, code).cloned()
    }

    /// Upcoming birthdays and anniversaries across all riders.
    pub fn upcoming_events(&self, now: NaiveDate, window_days: u32) -> Result<Vec<UpcomingEvent>> {
        upcoming_events(&self.repo.riders(), now, window_days)
    }

    /// Save admin notes on a rider. Blank notes clear them.
    pub fn update_notes(&self, rider_id: &str, notes: Option<&str>) -> Result<Rider> {
        let notes = notes.map(str::trim).filter(|text| !text.is_empty());
        if let Some(text) = notes {
            if text.chars().count() > MAX_NOTES_CHARS {
                return Err(AppError::Validation(format!(
                    "Notes must be at most {} characters",
                    MAX_NOTES_CHARS
                )));
            }
        }

        tracing::info!(rider_id, cleared = notes.is_none(), "Updating rider notes");
        self.repo
            .update_rider_notes(rider_id, notes.map(str::to_string))
    }

    /// Save the verification checklist on a rider.
    pub fn update_checklist(
        &self,
        rider_id: &str,
        checklist: VerificationChecklist,
    ) -> Result<Rider> {
        tracing::info!(
            rider_id,
            gear_verified = checklist.gear_verified,
            documents_submitted = checklist.documents_submitted,
            "Updating rider checklist"
        );
        self.repo.update_rider_checklist(rider_id, checklist)
    }

    /// All clubs with derived member counts.
    pub fn club_summaries(&self) -> Vec<ClubSummary> {
        self.repo.clubs().iter().map(ClubSummary::from).collect()
    }

    /// One club by ID.
    pub fn club(&self, club_id: &str) -> Result<ClubSummary> {
        self.repo
            .clubs()
            .iter()
            .find(|club: &&Club| club.id == club_id)
            .map(ClubSummary::from)
            .ok_or_else(|| AppError::NotFound(format!("Club {} not found", club_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryDb;
    use crate::models::{BloodGroup, Vehicle};
    use crate::time_utils::parse_date;

    fn d(raw: &str) -> NaiveDate {
        parse_date(raw).unwrap()
    }

    fn rider(id: &str, born: &str, last_ride: &str) -> Rider {
        Rider {
            id: id.to_string(),
            full_name: format!("Rider {}", id),
            phone_number: "+91 9000000000".to_string(),
            emergency_contact_phone: "+91 9000000001".to_string(),
            date_of_birth: d(born),
            join_date: d("2021-01-01"),
            last_activity_date: d(last_ride),
            anniversary_date: None,
            blood_group: BloodGroup::BPositive,
            vehicle: Vehicle {
                registration_number: "MH12-B-2000".to_string(),
                brand: "Triumph".to_string(),
                model: "Model T".to_string(),
                puc_expiry: None,
                insurance_expiry: None,
            },
            total_ride_count: 0,
            verification_checklist: None,
            sticker_code: None,
            notes: None,
        }
    }

    #[test]
    fn test_status_filter_parsing() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "inactive".parse::<StatusFilter>().unwrap(),
            StatusFilter::Inactive
        );
        assert!("dormant".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_birth_month_filter_parsing() {
        assert_eq!(
            "12".parse::<BirthMonthFilter>().unwrap(),
            BirthMonthFilter::Month(Month::December)
        );
        assert_eq!(
            "all".parse::<BirthMonthFilter>().unwrap(),
            BirthMonthFilter::All
        );
        assert!("0".parse::<BirthMonthFilter>().is_err());
        assert!("13".parse::<BirthMonthFilter>().is_err());
    }

    #[test]
    fn test_page_request_rejects_zero() {
        assert!(matches!(
            PageRequest::new(0, 10),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            PageRequest::new(1, 0),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_huge_page_is_empty_not_overflow() {
        let riders = vec![rider("R001", "1990-01-01", "2024-01-01")];
        let page = query_riders(
            &riders,
            &RiderFilter::default(),
            PageRequest::new(u32::MAX, u32::MAX).unwrap(),
            d("2024-01-02"),
        );

        assert!(page.items.is_empty());
        assert_eq!(page.total_matching, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_activity_status_boundary() {
        let now = d("2024-03-01");
        assert_eq!(
            compute_activity_status(&rider("R1", "1990-01-01", "2024-01-01"), now),
            ActivityStatus::Active
        );
        assert_eq!(
            compute_activity_status(&rider("R1", "1990-01-01", "2023-12-31"), now),
            ActivityStatus::Inactive
        );
    }

    #[test]
    fn test_age_around_birthday() {
        assert_eq!(compute_age(d("2000-03-01"), d("2024-03-01")).unwrap(), 24);
        assert_eq!(compute_age(d("2000-03-02"), d("2024-03-01")).unwrap(), 23);
    }

    #[test]
    fn test_age_for_leap_day_birthday() {
        assert_eq!(compute_age(d("2000-02-29"), d("2023-02-27")).unwrap(), 22);
        assert_eq!(compute_age(d("2000-02-29"), d("2023-02-28")).unwrap(), 23);
        assert_eq!(compute_age(d("2000-02-29"), d("2024-02-28")).unwrap(), 23);
        assert_eq!(compute_age(d("2000-02-29"), d("2024-02-29")).unwrap(), 24);
    }

    #[test]
    fn test_age_rejects_future_birth() {
        assert!(matches!(
            compute_age(d("2030-01-01"), d("2024-01-01")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_future_birth_date_degrades_only_that_row() {
        let db: Arc<dyn Repository> = Arc::new(InMemoryDb::new(
            vec![
                rider("R001", "1990-01-01", "2024-05-20"),
                rider("R002", "2099-01-01", "2024-05-20"),
            ],
            vec![],
            vec![],
        ));
        let service = DirectoryService::new(db);
        let now = d("2024-06-01");

        let page = service.list_riders(
            &RiderFilter::default(),
            PageRequest::new(1, 10).unwrap(),
            now,
        );
        assert_eq!(page.total_matching, 2);
        assert_eq!(page.items[0].age, Some(34));
        assert_eq!(page.items[1].age, None);
        assert_eq!(page.items[1].activity_status, ActivityStatus::Active);

        let detail = service.rider_detail("R002", now).unwrap();
        assert_eq!(detail.summary.age, None);
    }

    #[test]
    fn test_stale_revision_does_not_flush_cache() {
        let db: Arc<dyn Repository> = Arc::new(InMemoryDb::new(
            vec![rider("R001", "1990-01-01", "2024-01-01")],
            vec![],
            vec![],
        ));
        let service = DirectoryService::new(db);
        let now = d("2024-01-02");
        let page = PageRequest::new(1, 10).unwrap();

        service.update_notes("R001", Some("Fresh tyres")).unwrap();
        let current = service.repository().revision();
        service.query_riders(&RiderFilter::default(), page, now);
        assert_eq!(service.cached_queries(), 1);

        // A reader that sampled the revision before the write
        service.sync_revision(current - 1);
        assert_eq!(service.cached_queries(), 1);
        assert_eq!(service.cached_revision.load(Ordering::Acquire), current);

        service.sync_revision(current + 1);
        assert_eq!(service.cached_queries(), 0);
    }

    #[test]
    fn test_special_event_prefers_birthday() {
        let mut r = rider("R001", "1990-06-14", "2024-06-01");
        r.anniversary_date = Some(d("2015-06-20"));
        let event = special_event_this_month(&r, d("2024-06-01")).unwrap();
        assert_eq!(event.kind, EventKind::Birthday);
        assert_eq!(event.day, 14);

        r.date_of_birth = d("1990-07-14");
        let event = special_event_this_month(&r, d("2024-06-01")).unwrap();
        assert_eq!(event.kind, EventKind::Anniversary);
        assert_eq!(event.day, 20);

        assert!(special_event_this_month(&r, d("2024-08-01")).is_none());
    }

    #[test]
    fn test_sticker_lookup_is_trimmed_and_case_insensitive() {
        let mut r = rider("R001", "1990-01-01", "2024-01-01");
        r.sticker_code = Some("ST0042".to_string());
        let riders = vec![r];

        assert_eq!(find_by_sticker_code(&riders, " st0042 ").unwrap().id, "R001");
        assert!(matches!(
            find_by_sticker_code(&riders, "ST9999"),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            find_by_sticker_code(&riders, "   "),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_service_cache_invalidated_on_write() {
        let db: Arc<dyn Repository> = Arc::new(InMemoryDb::new(
            vec![rider("R001", "1990-01-01", "2024-01-01")],
            vec![],
            vec![],
        ));
        let service = DirectoryService::new(db);
        let now = d("2024-01-02");
        let page = PageRequest::new(1, 10).unwrap();

        let first = service.query_riders(&RiderFilter::default(), page, now);
        let second = service.query_riders(&RiderFilter::default(), page, now);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(service.cached_queries(), 1);

        service.update_notes("R001", Some("  Knee injury  ")).unwrap();

        let third = service.query_riders(&RiderFilter::default(), page, now);
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(third.items[0].notes.as_deref(), Some("Knee injury"));
        assert_eq!(service.cached_queries(), 1);
    }

    #[test]
    fn test_update_notes_validation() {
        let db: Arc<dyn Repository> = Arc::new(InMemoryDb::new(
            vec![rider("R001", "1990-01-01", "2024-01-01")],
            vec![],
            vec![],
        ));
        let service = DirectoryService::new(db);

        let too_long = "x".repeat(MAX_NOTES_CHARS + 1);
        assert!(matches!(
            service.update_notes("R001", Some(&too_long)),
            Err(AppError::Validation(_))
        ));

        let cleared = service.update_notes("R001", Some("   ")).unwrap();
        assert!(cleared.notes.is_none());
    }
}
