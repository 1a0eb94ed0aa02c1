// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod club;
pub mod event;
pub mod notification;
pub mod ride;
pub mod rider;

pub use club::{Club, ClubSummary};
pub use event::{EventKind, SpecialEvent, UpcomingEvent};
pub use notification::{Notification, NotificationKind};
pub use ride::RideEvent;
pub use rider::{ActivityStatus, BloodGroup, Rider, VerificationChecklist, Vehicle};
