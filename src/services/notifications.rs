// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin notification inbox (in memory).

use crate::error::{AppError, Result};
use crate::models::{Notification, NotificationKind};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Which notifications to list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationTab {
    #[default]
    All,
    Unread,
    Kind(NotificationKind),
}

impl NotificationTab {
    fn accepts(&self, notification: &Notification) -> bool {
        match self {
            NotificationTab::All => true,
            NotificationTab::Unread => !notification.read,
            NotificationTab::Kind(kind) => notification.kind == *kind,
        }
    }
}

impl FromStr for NotificationTab {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" | "all" => Ok(NotificationTab::All),
            "unread" => Ok(NotificationTab::Unread),
            other => other.parse().map(NotificationTab::Kind).map_err(|_| {
                AppError::Validation(format!("Unknown notification tab '{}'", other))
            }),
        }
    }
}

/// Inbox listing.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NotificationList {
    pub notifications: Vec<Notification>,
    /// Unread across the whole inbox, not just this tab
    pub unread_count: u32,
}

struct Inbox {
    notifications: Vec<Notification>,
    next_id: u64,
}

/// Shared admin inbox.
pub struct NotificationService {
    inbox: RwLock<Inbox>,
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl NotificationService {
    pub fn new(notifications: Vec<Notification>) -> Self {
        let next_id = notifications.iter().map(|n| n.id).max().unwrap_or(0) + 1;
        Self {
            inbox: RwLock::new(Inbox {
                notifications,
                next_id,
            }),
        }
    }

    /// Notifications on `tab`, newest first.
    pub fn list(&self, tab: NotificationTab) -> NotificationList {
        let inbox = self.inbox.read();
        let mut notifications: Vec<Notification> = inbox
            .notifications
            .iter()
            .filter(|n| tab.accepts(n))
            .cloned()
            .collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        NotificationList {
            notifications,
            unread_count: unread(&inbox.notifications),
        }
    }

    pub fn unread_count(&self) -> u32 {
        unread(&self.inbox.read().notifications)
    }

    pub fn mark_read(&self, id: u64) -> Result<Notification> {
        let mut inbox = self.inbox.write();
        let notification = inbox
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| not_found(id))?;
        notification.read = true;
        Ok(notification.clone())
    }

    /// Mark everything read. Returns how many changed.
    pub fn mark_all_read(&self) -> u32 {
        let mut inbox = self.inbox.write();
        let mut changed = 0;
        for notification in inbox.notifications.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            changed += 1;
        }
        changed
    }

    pub fn delete(&self, id: u64) -> Result<()> {
        let mut inbox = self.inbox.write();
        let before = inbox.notifications.len();
        inbox.notifications.retain(|n| n.id != id);
        if inbox.notifications.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    /// Remove everything. Returns how many were removed.
    pub fn clear(&self) -> u32 {
        let mut inbox = self.inbox.write();
        let removed = inbox.notifications.len() as u32;
        inbox.notifications.clear();
        removed
    }

    /// Add an unread notification.
    pub fn push(
        &self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Notification {
        let mut inbox = self.inbox.write();
        let notification = Notification {
            id: inbox.next_id,
            kind,
            title: title.into(),
            message: message.into(),
            created_at,
            read: false,
        };
        inbox.next_id += 1;
        inbox.notifications.push(notification.clone());

        tracing::info!(
            id = notification.id,
            kind = ?notification.kind,
            "Notification added"
        );
        notification
    }
}

fn unread(notifications: &[Notification]) -> u32 {
    notifications.iter().filter(|n| !n.read).count() as u32
}

fn not_found(id: u64) -> AppError {
    AppError::NotFound(format!("Notification {} not found", id))
}
