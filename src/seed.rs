//! Seed sets - the rows a load inserts
//!
//! A `SeedSet` is plain immutable data handed to the loader. The built-in
//! demonstration set is produced by [`SeedSet::travel_sample`]; alternative
//! sets can be read from TOML:
//!
//! ```toml
//! [[flights]]
//! flight_number = "AA123"
//! airline = "American Airlines"
//! origin = "New York"
//! destination = "Los Angeles"
//! date = "2024-09-21"
//! departure_time = "08:30"
//! arrival_time = "11:45"
//! price = 299.99
//! available_seats = 45
//! ```

use crate::model::{Booking, BookingStatus, Flight, User};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedSet {
    #[serde(default)]
    pub flights: Vec<Flight>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub users: Vec<User>,
}

impl SeedSet {
    pub fn new(flights: Vec<Flight>, bookings: Vec<Booking>, users: Vec<User>) -> Self {
        Self { flights, bookings, users }
    }

    /// Total number of rows across all tables
    pub fn len(&self) -> usize {
        self.flights.len() + self.bookings.len() + self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse a seed set from a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Config(format!("invalid seed set: {}", e)))
    }

    /// Read a seed set from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("invalid seed set {}: {}", path.display(), e)))
    }

    /// The demonstration data set: ten flights, five bookings, five users
    pub fn travel_sample() -> Self {
        let flight = |number: &str,
                      airline: &str,
                      origin: &str,
                      destination: &str,
                      date: &str,
                      departs: &str,
                      arrives: &str,
                      price: f64,
                      seats: u32| {
            Flight::new(number, airline, origin, destination, date, departs, arrives)
                .with_price(price)
                .with_seats(seats)
        };

        let flights = vec![
            flight("AA123", "American Airlines", "New York", "Los Angeles", "2024-09-21", "08:30", "11:45", 299.99, 45),
            flight("BA456", "British Airways", "London", "New York", "2024-09-22", "14:20", "17:30", 599.99, 23),
            flight("UA789", "United Airlines", "Chicago", "Miami", "2024-09-23", "09:15", "12:45", 189.99, 67),
            flight("DL101", "Delta Airlines", "Atlanta", "Seattle", "2024-09-24", "16:00", "18:20", 349.99, 12),
            flight("SW202", "Southwest Airlines", "Dallas", "Las Vegas", "2024-09-25", "11:30", "12:45", 129.99, 89),
            flight("JB303", "JetBlue", "Boston", "Los Angeles", "2024-09-26", "07:45", "11:15", 279.99, 34),
            flight("AA404", "American Airlines", "Miami", "New York", "2024-09-27", "13:10", "16:25", 249.99, 56),
            flight("UA505", "United Airlines", "San Francisco", "Chicago", "2024-09-28", "10:00", "15:45", 319.99, 78),
            flight("DL606", "Delta Airlines", "New York", "Paris", "2024-09-29", "22:30", "11:45+1", 699.99, 19),
            flight("LH707", "Lufthansa", "Frankfurt", "Tokyo", "2024-09-30", "13:25", "08:30+1", 899.99, 8),
        ];

        let bookings = vec![
            Booking::new("BK001", "AA123", "John Doe", "john.doe@email.com", "2024-09-15"),
            Booking::new("BK002", "BA456", "Jane Smith", "jane.smith@email.com", "2024-09-16"),
            Booking::new("BK003", "UA789", "Bob Johnson", "bob.johnson@email.com", "2024-09-17")
                .with_status(BookingStatus::Cancelled),
            Booking::new("BK004", "DL101", "Alice Brown", "alice.brown@email.com", "2024-09-18"),
            Booking::new("BK005", "SW202", "Charlie Wilson", "charlie.wilson@email.com", "2024-09-19"),
        ];

        let user = |name: &str, email: &str, phone: &str, preferences: &str| {
            User::new(name, email).with_phone(phone).with_preferences(preferences)
        };

        let users = vec![
            user("John Doe", "john.doe@email.com", "+1-555-0101", "beach,luxury"),
            user("Jane Smith", "jane.smith@email.com", "+1-555-0102", "adventure,budget"),
            user("Bob Johnson", "bob.johnson@email.com", "+1-555-0103", "cultural,business"),
            user("Alice Brown", "alice.brown@email.com", "+1-555-0104", "family,comfort"),
            user("Charlie Wilson", "charlie.wilson@email.com", "+1-555-0105", "solo,backpacking"),
        ];

        Self::new(flights, bookings, users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_travel_sample_shape() {
        let seed = SeedSet::travel_sample();
        assert_eq!(seed.flights.len(), 10);
        assert_eq!(seed.bookings.len(), 5);
        assert_eq!(seed.users.len(), 5);
        assert_eq!(seed.len(), 20);

        for booking in &seed.bookings {
            assert!(
                seed.flights.iter().any(|f| f.flight_number == booking.flight_number),
                "booking {} has no seeded flight",
                booking.booking_id
            );
        }
    }

    #[test]
    fn test_travel_sample_is_valid() {
        let seed = SeedSet::travel_sample();
        seed.flights.iter().try_for_each(Flight::validate).unwrap();
        seed.bookings.iter().try_for_each(Booking::validate).unwrap();
        seed.users.iter().try_for_each(User::validate).unwrap();
    }

    #[test]
    fn test_from_toml_str() {
        let seed = SeedSet::from_toml_str(
            r#"
            [[flights]]
            flight_number = "ZZ1"
            airline = "Test Air"
            origin = "Oslo"
            destination = "Rome"
            date = "2025-01-01"
            departure_time = "06:00"
            arrival_time = "09:30"

            [[users]]
            name = "Tess"
            email = "tess@example.com"
            "#,
        )
        .unwrap();

        assert_eq!(seed.flights.len(), 1);
        assert_eq!(seed.flights[0].price, None);
        assert!(seed.bookings.is_empty());
        assert_eq!(seed.users[0].phone, None);
    }

    #[test]
    fn test_negative_seats_rejected_at_parse() {
        let err = SeedSet::from_toml_str(
            r#"
            [[flights]]
            flight_number = "ZZ1"
            airline = "Test Air"
            origin = "Oslo"
            destination = "Rome"
            date = "2025-01-01"
            departure_time = "06:00"
            arrival_time = "09:30"
            available_seats = -3
            "#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
