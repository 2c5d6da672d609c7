//! Record types for the travel_info tables
//!
//! - `Flight`: a scheduled flight, keyed in practice by (flight_number, airline, date)
//! - `Booking`: a passenger booking, referencing a flight by flight_number
//! - `User`: a registered traveller, unique by email

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Booking status as stored in `bookings.status`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    /// Get the string representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" | "canceled" => Ok(BookingStatus::Cancelled),
            _ => Err(Error::InvalidRecord {
                entity: "booking",
                key: s.to_string(),
                reason: "unknown booking status".to_string(),
            }),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A row of the `flights` table (without its surrogate `id`).
///
/// `arrival_time` is kept as opaque text: next-day arrivals carry a `+1`
/// suffix (e.g. `"11:45+1"`) and are never parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub flight_number: String,
    pub airline: String,
    pub origin: String,
    pub destination: String,
    /// ISO date, e.g. `2024-09-22`
    pub date: String,
    pub departure_time: String,
    pub arrival_time: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub available_seats: Option<u32>,
}

impl Flight {
    /// Create a new flight with minimal required fields
    pub fn new(
        flight_number: impl Into<String>,
        airline: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        date: impl Into<String>,
        departure_time: impl Into<String>,
        arrival_time: impl Into<String>,
    ) -> Self {
        Self {
            flight_number: flight_number.into(),
            airline: airline.into(),
            origin: origin.into(),
            destination: destination.into(),
            date: date.into(),
            departure_time: departure_time.into(),
            arrival_time: arrival_time.into(),
            price: None,
            available_seats: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_seats(mut self, seats: u32) -> Self {
        self.available_seats = Some(seats);
        self
    }

    /// Check required fields before the record reaches storage
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("flight_number", &self.flight_number),
            ("airline", &self.airline),
            ("origin", &self.origin),
            ("destination", &self.destination),
            ("date", &self.date),
            ("departure_time", &self.departure_time),
            ("arrival_time", &self.arrival_time),
        ];
        require_non_empty("flight", &self.flight_number, &fields)?;

        if let Some(price) = self.price {
            if !price.is_finite() || price < 0.0 {
                return Err(Error::InvalidRecord {
                    entity: "flight",
                    key: self.flight_number.clone(),
                    reason: format!("price must be a non-negative amount, got {}", price),
                });
            }
        }
        Ok(())
    }
}

/// A row of the `bookings` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: String,
    /// Logical reference to `Flight::flight_number`
    pub flight_number: String,
    pub passenger_name: String,
    pub passenger_email: String,
    pub booking_date: String,
    #[serde(default)]
    pub status: BookingStatus,
}

impl Booking {
    pub fn new(
        booking_id: impl Into<String>,
        flight_number: impl Into<String>,
        passenger_name: impl Into<String>,
        passenger_email: impl Into<String>,
        booking_date: impl Into<String>,
    ) -> Self {
        Self {
            booking_id: booking_id.into(),
            flight_number: flight_number.into(),
            passenger_name: passenger_name.into(),
            passenger_email: passenger_email.into(),
            booking_date: booking_date.into(),
            status: BookingStatus::Confirmed,
        }
    }

    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("booking_id", &self.booking_id),
            ("flight_number", &self.flight_number),
            ("passenger_name", &self.passenger_name),
            ("passenger_email", &self.passenger_email),
            ("booking_date", &self.booking_date),
        ];
        require_non_empty("booking", &self.booking_id, &fields)
    }
}

/// A user to be inserted into the `users` table.
///
/// `user_id` is assigned by the database; `created_date` falls back to
/// `CURRENT_TIMESTAMP` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Comma-separated tags, stored verbatim
    #[serde(default)]
    pub preferences: Option<String>,
    #[serde(default)]
    pub created_date: Option<String>,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
            preferences: None,
            created_date: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_preferences(mut self, preferences: impl Into<String>) -> Self {
        self.preferences = Some(preferences.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [("name", &self.name), ("email", &self.email)];
        require_non_empty("user", &self.email, &fields)
    }
}

/// A user as read back from storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub preferences: Option<String>,
    pub created_date: String,
}

/// One row of the bookings ⨝ flights verification query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingOverview {
    pub booking_id: String,
    pub passenger_name: String,
    pub flight_number: String,
    pub destination: String,
    pub status: BookingStatus,
}

fn require_non_empty(entity: &'static str, key: &str, fields: &[(&str, &String)]) -> Result<()> {
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(Error::InvalidRecord {
                entity,
                key: key.to_string(),
                reason: format!("{} must not be empty", name),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_status_roundtrip() {
        for status in [BookingStatus::Confirmed, BookingStatus::Cancelled] {
            let parsed: BookingStatus = status.as_str().parse().unwrap();
            assert_eq!(status, parsed);
        }
        assert_eq!(BookingStatus::from_str("CANCELED").unwrap(), BookingStatus::Cancelled);
        assert_eq!(BookingStatus::default(), BookingStatus::Confirmed);
    }

    #[test]
    fn test_unknown_status_is_write_error() {
        let err = BookingStatus::from_str("pending").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Write);
    }

    #[test]
    fn test_flight_validation() {
        let flight = Flight::new("DL606", "Delta Airlines", "New York", "Paris", "2024-09-29", "22:30", "11:45+1")
            .with_price(699.99)
            .with_seats(19);
        assert!(flight.validate().is_ok());
        assert_eq!(flight.arrival_time, "11:45+1");

        let negative = flight.clone().with_price(-1.0);
        assert!(negative.validate().is_err());

        let mut blank = flight;
        blank.airline = "  ".to_string();
        let err = blank.validate().unwrap_err();
        assert!(err.to_string().contains("airline"));
    }

    #[test]
    fn test_booking_status_defaults_when_absent_in_toml() {
        let booking: Booking = toml::from_str(
            r#"
            booking_id = "BK100"
            flight_number = "AA123"
            passenger_name = "Test"
            passenger_email = "t@example.com"
            booking_date = "2024-09-01"
            "#,
        )
        .unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);
    }
}
