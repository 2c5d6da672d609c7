//! # Travelseed - reference data loader for the travel_info database
//!
//! Brings a SQLite file from "absent or partially initialized" to
//! "fully initialized with baseline schema and seed rows", and is safe to
//! run again on an already populated file.
//!
//! Travelseed provides:
//! - Typed records for the `flights`, `bookings` and `users` tables
//! - A [`SchemaLoader`] that ensures the schema and inserts seed rows idempotently
//! - SQLite-backed storage with the verification queries used by the CLI
//! - Seed sets as immutable configuration (built-in or TOML)

pub mod model;
pub mod seed;
pub mod storage;
pub mod loader;
pub mod report;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use model::{Booking, BookingOverview, BookingStatus, Flight, StoredUser, User};
pub use seed::SeedSet;
pub use storage::TravelStore;
pub use loader::{LoaderState, SchemaLoader};
pub use report::{SeedReport, TableCounts, TableOutcome};

/// Result type alias for Travelseed operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Travelseed operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage unavailable at {path}: {source}")]
    StorageUnavailable {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Schema error: {0}")]
    Schema(#[source] rusqlite::Error),

    #[error("Schema mismatch on table '{table}': {detail}")]
    SchemaMismatch { table: String, detail: String },

    #[error("Schema not initialized: run ensure_schema before seeding")]
    SchemaNotReady,

    #[error("Write error: {0}")]
    Write(#[source] rusqlite::Error),

    #[error("Invalid {entity} record '{key}': {reason}")]
    InvalidRecord {
        entity: &'static str,
        key: String,
        reason: String,
    },

    #[error("Booking {booking_id} references unknown flight {flight_number}")]
    UnknownFlight {
        booking_id: String,
        flight_number: String,
    },

    #[error("Read error: {0}")]
    Read(#[source] rusqlite::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of [`Error`], one per failure mode the loader reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    StorageUnavailable,
    Schema,
    Write,
    Read,
    Config,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::StorageUnavailable { .. } => ErrorKind::StorageUnavailable,
            Error::Schema(_) | Error::SchemaMismatch { .. } | Error::SchemaNotReady => {
                ErrorKind::Schema
            }
            Error::Write(_) | Error::InvalidRecord { .. } | Error::UnknownFlight { .. } => {
                ErrorKind::Write
            }
            Error::Read(_) => ErrorKind::Read,
            Error::Config(_) | Error::Io(_) => ErrorKind::Config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let mismatch = Error::SchemaMismatch {
            table: "flights".into(),
            detail: "missing column price".into(),
        };
        assert_eq!(mismatch.kind(), ErrorKind::Schema);
        assert_eq!(Error::SchemaNotReady.kind(), ErrorKind::Schema);

        let unknown = Error::UnknownFlight {
            booking_id: "BK999".into(),
            flight_number: "ZZ000".into(),
        };
        assert_eq!(unknown.kind(), ErrorKind::Write);
        assert!(unknown.to_string().contains("ZZ000"));

        assert_eq!(Error::Read(rusqlite::Error::InvalidQuery).kind(), ErrorKind::Read);
        assert_eq!(Error::Config("bad".into()).kind(), ErrorKind::Config);
    }
}
