// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory repository.
//!
//! Collections are held behind `Arc` so readers can take a snapshot and
//! release the lock before doing any work. Writes copy-on-write the rider
//! collection and bump the revision.

use crate::db::{Dataset, Repository};
use crate::error::{AppError, Result};
use crate::models::{Club, RideEvent, Rider, VerificationChecklist};
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Default)]
struct Collections {
    riders: Arc<Vec<Rider>>,
    rides: Arc<Vec<RideEvent>>,
    clubs: Arc<Vec<Club>>,
    revision: u64,
}

/// Repository backed by process memory.
#[derive(Default)]
pub struct InMemoryDb {
    inner: RwLock<Collections>,
}

impl InMemoryDb {
    pub fn new(riders: Vec<Rider>, rides: Vec<RideEvent>, clubs: Vec<Club>) -> Self {
        Self {
            inner: RwLock::new(Collections {
                riders: Arc::new(riders),
                rides: Arc::new(rides),
                clubs: Arc::new(clubs),
                revision: 0,
            }),
        }
    }

    /// Build from a loaded dataset (notifications are not held here).
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self::new(
            dataset.riders.clone(),
            dataset.rides.clone(),
            dataset.clubs.clone(),
        )
    }

    fn modify_rider<F>(&self, rider_id: &str, apply: F) -> Result<Rider>
    where
        F: FnOnce(&mut Rider),
    {
        let mut inner = self.inner.write();
        let riders = Arc::make_mut(&mut inner.riders);
        let rider = riders
            .iter_mut()
            .find(|r| r.id == rider_id)
            .ok_or_else(|| AppError::rider_not_found(rider_id))?;

        apply(rider);
        let updated = rider.clone();
        inner.revision += 1;

        tracing::debug!(rider_id, revision = inner.revision, "Rider updated");
        Ok(updated)
    }
}

impl Repository for InMemoryDb {
    fn riders(&self) -> Arc<Vec<Rider>> {
        self.inner.read().riders.clone()
    }

    fn rides(&self) -> Arc<Vec<RideEvent>> {
        self.inner.read().rides.clone()
    }

    fn clubs(&self) -> Arc<Vec<Club>> {
        self.inner.read().clubs.clone()
    }

    fn revision(&self) -> u64 {
        self.inner.read().revision
    }

    fn update_rider_notes(&self, rider_id: &str, notes: Option<String>) -> Result<Rider> {
        self.modify_rider(rider_id, |rider| rider.notes = notes)
    }

    fn update_rider_checklist(
        &self,
        rider_id: &str,
        checklist: VerificationChecklist,
    ) -> Result<Rider> {
        self.modify_rider(rider_id, |rider| {
            rider.verification_checklist = Some(checklist)
        })
    }
}
