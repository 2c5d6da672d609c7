//! Storage Layer - SQLite-backed persistence
//!
//! The travel_info database holds three tables:
//! - flights(id, flight_number, airline, destination, origin, date, departure_time, arrival_time, price, available_seats)
//! - bookings(booking_id, flight_number, passenger_name, passenger_email, booking_date, status)
//! - users(user_id, name, email, phone, preferences, created_date)

pub mod schema;
pub mod sqlite;

pub use sqlite::TravelStore;
