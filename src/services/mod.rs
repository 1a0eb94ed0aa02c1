// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod dashboard;
pub mod directory;
pub mod export;
pub mod notifications;

pub use dashboard::DashboardStats;
pub use directory::{DirectoryService, Page, PageRequest, RiderFilter};
pub use notifications::{NotificationService, NotificationTab};
