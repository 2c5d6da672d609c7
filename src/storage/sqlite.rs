//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, OptionalExtension, Transaction, params};
use tracing::debug;
use crate::{Error, Result};
use crate::model::{BookingOverview, BookingStatus, Booking, Flight, StoredUser, User};
use crate::report::TableCounts;
use super::schema::{self, TableShape};

const FLIGHT_COLUMNS: &str =
    "flight_number, airline, origin, destination, date, departure_time, arrival_time, price, available_seats";

/// SQLite-backed storage for the travel_info tables
pub struct TravelStore {
    conn: Connection,
}

impl TravelStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| Error::StorageUnavailable {
            path: path.display().to_string(),
            source,
        })?;
        debug!("opened storage at {}", path.display());
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::StorageUnavailable {
            path: ":memory:".to_string(),
            source,
        })?;
        Ok(Self { conn })
    }

    /// Create missing tables and indexes, then verify every table's shape.
    ///
    /// Existing tables are never altered; a table whose columns, primary key
    /// or unique constraints differ from the expected shape is reported as
    /// [`Error::SchemaMismatch`].
    pub fn ensure_schema(&self) -> Result<()> {
        for shape in schema::TABLES {
            self.verify_shape(shape, false)?;
        }
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, []).map_err(Error::Schema)?;
        }
        self.check_schema()
    }

    /// Verify every table without running any DDL; absent tables are a mismatch
    pub fn check_schema(&self) -> Result<()> {
        for shape in schema::TABLES {
            self.verify_shape(shape, true)?;
        }
        Ok(())
    }

    /// Check a table against its expected shape
    fn verify_shape(&self, shape: &TableShape, require_present: bool) -> Result<()> {
        let found = self.table_columns(shape.name)?;
        if found.is_empty() {
            if require_present {
                return Err(Error::SchemaMismatch {
                    table: shape.name.to_string(),
                    detail: "table does not exist".to_string(),
                });
            }
            return Ok(());
        }
        let unique = self.unique_columns(shape.name)?;
        match shape.mismatch(&found, &unique) {
            Some(detail) => Err(Error::SchemaMismatch {
                table: shape.name.to_string(),
                detail,
            }),
            None => Ok(()),
        }
    }

    /// Columns of a table as `(name, is primary key)`; empty if the table is absent
    pub fn table_columns(&self, table: &str) -> Result<Vec<(String, bool)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, pk FROM pragma_table_info(?1) ORDER BY cid")
            .map_err(Error::Schema)?;

        let columns = stmt
            .query_map([table], |row| {
                let name: String = row.get(0)?;
                let pk: i64 = row.get(1)?;
                Ok((name, pk > 0))
            })
            .map_err(Error::Schema)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::Schema)?;

        Ok(columns)
    }

    /// Columns that are covered on their own by a full unique index
    pub fn unique_columns(&self, table: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(
                r#"
                SELECT MIN(ii.name)
                FROM pragma_index_list(?1) AS il
                JOIN pragma_index_info(il.name) AS ii
                WHERE il."unique" = 1 AND il.partial = 0
                GROUP BY il.name
                HAVING COUNT(*) = 1
                "#,
            )
            .map_err(Error::Schema)?;

        let columns = stmt
            .query_map([table], |row| row.get::<_, Option<String>>(0))
            .map_err(Error::Schema)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::Schema)?;

        Ok(columns.into_iter().flatten().collect())
    }

    // ========== Transactions ==========

    /// Begin a transaction; it rolls back on drop unless committed
    pub fn transaction(&self) -> Result<Transaction<'_>> {
        self.conn.unchecked_transaction().map_err(Error::Write)
    }

    // ========== Flight Operations ==========

    /// Insert a flight unless one with the same (flight_number, airline, date) exists.
    ///
    /// Returns `true` if a row was inserted.
    pub fn insert_flight(&self, flight: &Flight) -> Result<bool> {
        flight.validate()?;
        if self.flight_exists(flight)? {
            return Ok(false);
        }

        self.conn
            .execute(
                r#"
                INSERT INTO flights (flight_number, airline, origin, destination, date, departure_time, arrival_time, price, available_seats)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
                params![
                    flight.flight_number,
                    flight.airline,
                    flight.origin,
                    flight.destination,
                    flight.date,
                    flight.departure_time,
                    flight.arrival_time,
                    flight.price,
                    flight.available_seats,
                ],
            )
            .map_err(Error::Write)?;
        Ok(true)
    }

    /// Check whether a flight with the same natural key is already stored
    pub fn flight_exists(&self, flight: &Flight) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM flights WHERE flight_number = ?1 AND airline = ?2 AND date = ?3 LIMIT 1",
                params![flight.flight_number, flight.airline, flight.date],
                |row| row.get(0),
            )
            .optional()
            .map_err(Error::Read)?;
        Ok(found.is_some())
    }

    /// Check whether any stored flight carries this flight number
    pub fn has_flight_number(&self, flight_number: &str) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM flights WHERE flight_number = ?1 LIMIT 1",
                [flight_number],
                |row| row.get(0),
            )
            .optional()
            .map_err(Error::Read)?;
        Ok(found.is_some())
    }

    /// Find flights arriving at a destination
    pub fn flights_to(&self, destination: &str) -> Result<Vec<Flight>> {
        let sql = format!(
            "SELECT {} FROM flights WHERE destination = ?1 ORDER BY id",
            FLIGHT_COLUMNS
        );
        self.query_flights(&sql, [destination])
    }

    /// Find flights with more than `seats` seats available
    pub fn flights_with_seats_above(&self, seats: u32) -> Result<Vec<Flight>> {
        let sql = format!(
            "SELECT {} FROM flights WHERE available_seats > ?1 ORDER BY id",
            FLIGHT_COLUMNS
        );
        self.query_flights(&sql, [seats])
    }

    /// Count all flights
    pub fn count_flights(&self) -> Result<usize> {
        self.count("flights")
    }

    fn query_flights<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<Flight>> {
        let mut stmt = self.conn.prepare(sql).map_err(Error::Read)?;
        let flights = stmt
            .query_map(params, |row| self.row_to_flight(row))
            .map_err(Error::Read)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::Read)?;
        Ok(flights)
    }

    /// Helper to convert a row to a Flight
    fn row_to_flight(&self, row: &rusqlite::Row) -> rusqlite::Result<Flight> {
        Ok(Flight {
            flight_number: row.get(0)?,
            airline: row.get(1)?,
            origin: row.get(2)?,
            destination: row.get(3)?,
            date: row.get(4)?,
            departure_time: row.get(5)?,
            arrival_time: row.get(6)?,
            price: row.get(7)?,
            available_seats: row.get(8)?,
        })
    }

    // ========== Booking Operations ==========

    /// Insert a booking, skipping it if the booking_id is already taken.
    ///
    /// The flight reference is checked first: a booking for a flight number
    /// that is not stored fails with [`Error::UnknownFlight`].
    pub fn insert_booking(&self, booking: &Booking) -> Result<bool> {
        booking.validate()?;
        if !self.has_flight_number(&booking.flight_number)? {
            return Err(Error::UnknownFlight {
                booking_id: booking.booking_id.clone(),
                flight_number: booking.flight_number.clone(),
            });
        }

        let changed = self
            .conn
            .execute(
                r#"
                INSERT INTO bookings (booking_id, flight_number, passenger_name, passenger_email, booking_date, status)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ON CONFLICT(booking_id) DO NOTHING
                "#,
                params![
                    booking.booking_id,
                    booking.flight_number,
                    booking.passenger_name,
                    booking.passenger_email,
                    booking.booking_date,
                    booking.status.as_str(),
                ],
            )
            .map_err(Error::Write)?;
        Ok(changed > 0)
    }

    /// Bookings joined with their flights, ordered by booking_id
    pub fn booking_overview(&self) -> Result<Vec<BookingOverview>> {
        let mut stmt = self
            .conn
            .prepare(
                r#"
                SELECT b.booking_id, b.passenger_name, f.flight_number, f.destination, b.status
                FROM bookings b
                JOIN flights f ON b.flight_number = f.flight_number
                ORDER BY b.booking_id
                "#,
            )
            .map_err(Error::Read)?;

        let rows = stmt
            .query_map([], |row| {
                let status_str: String = row.get(4)?;
                let status: BookingStatus = status_str.parse().map_err(|e: Error| {
                    rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
                })?;
                Ok(BookingOverview {
                    booking_id: row.get(0)?,
                    passenger_name: row.get(1)?,
                    flight_number: row.get(2)?,
                    destination: row.get(3)?,
                    status,
                })
            })
            .map_err(Error::Read)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::Read)?;

        Ok(rows)
    }

    /// Count all bookings
    pub fn count_bookings(&self) -> Result<usize> {
        self.count("bookings")
    }

    // ========== User Operations ==========

    /// Insert a user, skipping it if the email is already registered.
    ///
    /// A missing `created_date` takes the column default (load time).
    pub fn insert_user(&self, user: &User) -> Result<bool> {
        user.validate()?;
        let changed = self
            .conn
            .execute(
                r#"
                INSERT INTO users (name, email, phone, preferences, created_date)
                VALUES (?1, ?2, ?3, ?4, COALESCE(?5, CURRENT_TIMESTAMP))
                ON CONFLICT(email) DO NOTHING
                "#,
                params![
                    user.name,
                    user.email,
                    user.phone,
                    user.preferences,
                    user.created_date,
                ],
            )
            .map_err(Error::Write)?;
        Ok(changed > 0)
    }

    /// Get a user by email
    pub fn find_user_by_email(&self, email: &str) -> Result<Option<StoredUser>> {
        self.conn
            .query_row(
                "SELECT user_id, name, email, phone, preferences, created_date FROM users WHERE email = ?1",
                [email],
                |row| {
                    Ok(StoredUser {
                        user_id: row.get(0)?,
                        name: row.get(1)?,
                        email: row.get(2)?,
                        phone: row.get(3)?,
                        preferences: row.get(4)?,
                        created_date: row.get(5)?,
                    })
                },
            )
            .optional()
            .map_err(Error::Read)
    }

    /// Count all users
    pub fn count_users(&self) -> Result<usize> {
        self.count("users")
    }

    // ========== Statistics ==========

    fn count(&self, table: &str) -> Result<usize> {
        // table names come from this module only
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let count: i64 = self
            .conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(Error::Read)?;
        Ok(count as usize)
    }

    /// Row counts for every table
    pub fn counts(&self) -> Result<TableCounts> {
        Ok(TableCounts {
            flights: self.count_flights()?,
            bookings: self.count_bookings()?,
            users: self.count_users()?,
        })
    }
}
