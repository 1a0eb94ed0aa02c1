// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin API routes: rider directory, events, dashboard and clubs.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{ClubSummary, Rider, UpcomingEvent, VerificationChecklist};
use crate::services::dashboard::{dashboard_stats, DashboardStats};
use crate::services::directory::{RiderDetail, RiderSummary};
use crate::services::export::{export_file_name, export_riders_to_delimited_text, parse_columns};
use crate::services::{Page, PageRequest, RiderFilter};
use crate::time_utils::today;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// Largest page a listing may request.
pub const MAX_PER_PAGE: u32 = 100;

/// Largest page an export may request.
pub const MAX_EXPORT_PER_PAGE: u32 = 1000;

/// Longest accepted search string.
pub const MAX_SEARCH_CHARS: u64 = 100;

/// Largest look-ahead accepted by the upcoming events endpoint.
pub const MAX_UPCOMING_WINDOW_DAYS: u32 = 366;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/riders", get(list_riders))
        .route("/api/riders/export", get(export_riders))
        .route("/api/riders/{id}", get(get_rider))
        .route("/api/riders/{id}/notes", put(update_notes))
        .route("/api/riders/{id}/checklist", put(update_checklist))
        .route("/api/events/upcoming", get(get_upcoming_events))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/clubs", get(list_clubs))
        .route("/api/clubs/{id}", get(get_club))
}

// ─── Riders ──────────────────────────────────────────────────

fn default_page() -> u32 {
    1
}
fn default_per_page() -> u32 {
    10
}

fn build_filter(
    search: Option<&str>,
    status: Option<&str>,
    birth_month: Option<&str>,
) -> Result<RiderFilter> {
    Ok(RiderFilter {
        search_text: search.map(str::to_string),
        status: status.unwrap_or_default().parse()?,
        birth_month: birth_month.unwrap_or_default().parse()?,
    })
}

#[derive(Debug, Deserialize, Validate)]
struct RidersQuery {
    /// Name or phone substring
    #[validate(length(max = MAX_SEARCH_CHARS))]
    search: Option<String>,
    /// all | active | inactive
    status: Option<String>,
    /// all | 1..12
    birth_month: Option<String>,
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    page: u32,
    #[serde(default = "default_per_page")]
    #[validate(range(min = 1, max = MAX_PER_PAGE))]
    per_page: u32,
}

impl RidersQuery {
    fn filter(&self) -> Result<RiderFilter> {
        build_filter(
            self.search.as_deref(),
            self.status.as_deref(),
            self.birth_month.as_deref(),
        )
    }
}

/// Filtered, paginated rider list.
async fn list_riders(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<RidersQuery>,
) -> Result<Json<Page<RiderSummary>>> {
    params.validate()?;
    let filter = params.filter()?;

    tracing::debug!(
        user_id = %user.user_id,
        search = ?params.search,
        status = ?filter.status,
        birth_month = ?filter.birth_month,
        page = params.page,
        per_page = params.per_page,
        "Listing riders"
    );

    let page = PageRequest::new(params.page, params.per_page)?;
    Ok(Json(state.directory.list_riders(&filter, page, today())))
}

#[derive(Debug, Deserialize, Validate)]
struct ExportQuery {
    #[validate(length(max = MAX_SEARCH_CHARS))]
    search: Option<String>,
    status: Option<String>,
    birth_month: Option<String>,
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    page: u32,
    #[serde(default = "default_per_page")]
    #[validate(range(min = 1, max = MAX_EXPORT_PER_PAGE))]
    per_page: u32,
    /// Comma-separated column keys; defaults to the standard set
    columns: Option<String>,
}

/// Download the current result page as CSV.
async fn export_riders(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ExportQuery>,
) -> Result<Response> {
    params.validate()?;
    let filter = build_filter(
        params.search.as_deref(),
        params.status.as_deref(),
        params.birth_month.as_deref(),
    )?;
    let columns = parse_columns(params.columns.as_deref())?;
    let now = today();

    let page = state
        .directory
        .query_riders(&filter, PageRequest::new(params.page, params.per_page)?, now);
    let body = export_riders_to_delimited_text(&page.items, &columns, now)?;

    tracing::info!(
        user_id = %user.user_id,
        rows = page.items.len(),
        columns = columns.len(),
        "Exported riders"
    );

    let disposition = format!("attachment; filename=\"{}\"", export_file_name(now));
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// Rider profile with ride history.
async fn get_rider(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RiderDetail>> {
    Ok(Json(state.directory.rider_detail(&id, today())?))
}

#[derive(Debug, Deserialize)]
struct NotesUpdate {
    notes: Option<String>,
}

async fn update_notes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<NotesUpdate>,
) -> Result<Json<Rider>> {
    Ok(Json(
        state.directory.update_notes(&id, body.notes.as_deref())?,
    ))
}

async fn update_checklist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(checklist): Json<VerificationChecklist>,
) -> Result<Json<Rider>> {
    Ok(Json(state.directory.update_checklist(&id, checklist)?))
}

// ─── Events & Dashboard ──────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
struct UpcomingQuery {
    #[validate(range(max = MAX_UPCOMING_WINDOW_DAYS))]
    days: Option<u32>,
}

/// Birthdays and anniversaries within the look-ahead window.
async fn get_upcoming_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UpcomingQuery>,
) -> Result<Json<Vec<UpcomingEvent>>> {
    params.validate()?;
    let days = params.days.unwrap_or(state.config.upcoming_window_days);
    Ok(Json(state.directory.upcoming_events(today(), days)?))
}

async fn get_dashboard(State(state): State<Arc<AppState>>) -> Result<Json<DashboardStats>> {
    let repo = state.directory.repository();
    let stats = dashboard_stats(
        &repo.riders(),
        &repo.rides(),
        today(),
        state.config.upcoming_window_days,
    )?;
    Ok(Json(stats))
}

// ─── Clubs ───────────────────────────────────────────────────

async fn list_clubs(State(state): State<Arc<AppState>>) -> Json<Vec<ClubSummary>> {
    Json(state.directory.club_summaries())
}

async fn get_club(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ClubSummary>> {
    Ok(Json(state.directory.club(&id)?))
}
