// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin notification inbox routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::Result;
use crate::models::Notification;
use crate::services::notifications::NotificationList;
use crate::services::NotificationTab;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/notifications",
            get(list_notifications).delete(clear_notifications),
        )
        .route("/api/notifications/read-all", post(mark_all_read))
        .route("/api/notifications/{id}/read", post(mark_read))
        .route("/api/notifications/{id}", delete(delete_notification))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    /// all | unread | system | rider | event | emergency
    tab: Option<String>,
}

/// Count of notifications changed by a bulk action.
#[derive(Debug, Serialize)]
pub struct BulkResult {
    pub affected: u32,
}

async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> Result<Json<NotificationList>> {
    let tab: NotificationTab = params.tab.as_deref().unwrap_or_default().parse()?;
    Ok(Json(state.notifications.list(tab)))
}

async fn mark_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Notification>> {
    Ok(Json(state.notifications.mark_read(id)?))
}

async fn mark_all_read(State(state): State<Arc<AppState>>) -> Json<BulkResult> {
    Json(BulkResult {
        affected: state.notifications.mark_all_read(),
    })
}

async fn delete_notification(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<StatusCode> {
    state.notifications.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn clear_notifications(State(state): State<Arc<AppState>>) -> Json<BulkResult> {
    let affected = state.notifications.clear();
    tracing::info!(affected, "Cleared notifications");
    Json(BulkResult { affected })
}
