//! SchemaLoader - idempotent schema initialization and seeding
//!
//! Lifecycle:
//! `Uninitialized` → `ensure_schema` → `SchemaReady` → `seed_data` → `Populated`.
//! `seed_data` may be called again from `Populated`; rows that already exist
//! are counted as skipped.

use crate::report::{SeedReport, TableCounts};
use crate::seed::SeedSet;
use crate::storage::TravelStore;
use crate::{Error, Result};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
    Uninitialized,
    SchemaReady,
    Populated,
}

/// Drives a [`TravelStore`] through schema creation and seeding.
///
/// The loader owns the store, so the underlying connection is released when
/// the loader is dropped, on success and error paths alike.
pub struct SchemaLoader {
    store: TravelStore,
    seed: SeedSet,
    state: LoaderState,
}

impl SchemaLoader {
    pub fn new(store: TravelStore, seed: SeedSet) -> Self {
        Self {
            store,
            seed,
            state: LoaderState::Uninitialized,
        }
    }

    /// Open the database file at `path` and wrap it in a loader
    pub fn open(path: &Path, seed: SeedSet) -> Result<Self> {
        Ok(Self::new(TravelStore::open(path)?, seed))
    }

    pub fn state(&self) -> LoaderState {
        self.state
    }

    pub fn store(&self) -> &TravelStore {
        &self.store
    }

    pub fn seed(&self) -> &SeedSet {
        &self.seed
    }

    /// Create the tables if absent and check the shape of existing ones
    pub fn ensure_schema(&mut self) -> Result<()> {
        self.store.ensure_schema()?;
        if self.state == LoaderState::Uninitialized {
            self.state = LoaderState::SchemaReady;
        }
        info!("schema ready");
        Ok(())
    }

    /// Insert the seed set in one transaction.
    ///
    /// Flights go in before bookings so that booking references can be
    /// checked. Rows that hit a uniqueness conflict are skipped; any other
    /// failure rolls back the whole call.
    pub fn seed_data(&mut self) -> Result<SeedReport> {
        if self.state == LoaderState::Uninitialized {
            return Err(Error::SchemaNotReady);
        }

        let mut report = SeedReport::default();
        let tx = self.store.transaction()?;

        for flight in &self.seed.flights {
            let inserted = self.store.insert_flight(flight)?;
            debug!(flight = %flight.flight_number, inserted, "flight");
            report.flights.record(inserted);
        }

        for booking in &self.seed.bookings {
            let inserted = self.store.insert_booking(booking)?;
            debug!(booking = %booking.booking_id, inserted, "booking");
            report.bookings.record(inserted);
        }

        for user in &self.seed.users {
            let inserted = self.store.insert_user(user)?;
            debug!(user = %user.email, inserted, "user");
            report.users.record(inserted);
        }

        tx.commit().map_err(Error::Write)?;
        self.state = LoaderState::Populated;

        info!(
            inserted = report.total_inserted(),
            skipped = report.total_skipped(),
            "seed data committed"
        );
        Ok(report)
    }

    /// Row counts per table
    pub fn summarize(&self) -> Result<TableCounts> {
        self.store.counts()
    }

    /// Convenience for the full load: schema, seed, then summary
    pub fn run(&mut self) -> Result<(SeedReport, TableCounts)> {
        self.ensure_schema()?;
        let report = self.seed_data()?;
        let counts = self.summarize()?;
        Ok((report, counts))
    }
}
