// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rider-Directory: backend for a cycling club's admin dashboard
//!
//! This crate holds the club's rider, ride and club records, derives
//! activity status, ages and upcoming birthdays/anniversaries from them, and
//! serves filtered, paginated listings, CSV exports and public
//! sticker-code lookups over HTTP.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::{Dataset, InMemoryDb, Repository};
use services::{DirectoryService, NotificationService};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub directory: DirectoryService,
    pub notifications: NotificationService,
}

impl AppState {
    /// Build state over an arbitrary repository.
    pub fn new(
        config: Config,
        repo: Arc<dyn Repository>,
        notifications: NotificationService,
    ) -> Self {
        Self {
            config,
            directory: DirectoryService::new(repo),
            notifications,
        }
    }

    /// Build state from a loaded dataset, held in memory.
    pub fn from_dataset(config: Config, dataset: Dataset) -> Self {
        let repo = Arc::new(InMemoryDb::from_dataset(&dataset));
        Self::new(
            config,
            repo,
            NotificationService::new(dataset.notifications),
        )
    }
}
