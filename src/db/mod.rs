// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data source layer.
//!
//! The directory reads riders, rides and clubs through [`Repository`].
//! The only implementation today is [`InMemoryDb`], loaded from a JSON
//! [`Dataset`] at startup or built directly from fixtures in tests.

pub mod dataset;
pub mod memory;

pub use dataset::{Dataset, DatasetError};
pub use memory::InMemoryDb;

use crate::error::Result;
use crate::models::{Club, RideEvent, Rider, VerificationChecklist};
use std::sync::Arc;

/// Read access to the club's records plus the few writes admins can make.
///
/// Readers get `Arc` snapshots; a snapshot never changes after it is handed out.
pub trait Repository: Send + Sync {
    /// All riders in insertion order.
    fn riders(&self) -> Arc<Vec<Rider>>;

    /// All rides in insertion order.
    fn rides(&self) -> Arc<Vec<RideEvent>>;

    /// All clubs in insertion order.
    fn clubs(&self) -> Arc<Vec<Club>>;

    /// Changes whenever any collection is written.
    fn revision(&self) -> u64;

    /// Replace a rider's notes. Returns the updated rider.
    fn update_rider_notes(&self, rider_id: &str, notes: Option<String>) -> Result<Rider>;

    /// Replace a rider's verification checklist. Returns the updated rider.
    fn update_rider_checklist(
        &self,
        rider_id: &str,
        checklist: VerificationChecklist,
    ) -> Result<Rider>;
}
