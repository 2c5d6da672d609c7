use crate::model::{BookingOverview, BookingStatus, Flight};
use crate::report::SeedReport;
use crate::ui::theme;
use owo_colors::OwoColorize;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }
        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stats_table(stats: &[(&str, &str)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, value);
    }
    builder.build()
}

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Table")]
    table: &'static str,
    #[tabled(rename = "Inserted")]
    inserted: usize,
    #[tabled(rename = "Skipped")]
    skipped: usize,
}

pub fn seed_report_table(report: &SeedReport) -> String {
    let rows: Vec<OutcomeRow> = report
        .tables()
        .into_iter()
        .map(|(table, outcome)| OutcomeRow {
            table,
            inserted: outcome.inserted,
            skipped: outcome.skipped,
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct FlightRow {
    #[tabled(rename = "Flight")]
    flight_number: String,
    #[tabled(rename = "Airline")]
    airline: String,
    #[tabled(rename = "Route")]
    route: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Departs")]
    departs: String,
    #[tabled(rename = "Arrives")]
    arrives: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Seats")]
    seats: String,
}

pub fn flight_table(flights: &[Flight]) -> String {
    let rows: Vec<FlightRow> = flights
        .iter()
        .map(|f| FlightRow {
            flight_number: f.flight_number.clone(),
            airline: f.airline.clone(),
            route: format!("{} -> {}", f.origin, f.destination),
            date: f.date.clone(),
            departs: f.departure_time.clone(),
            arrives: f.arrival_time.clone(),
            price: f.price.map(|p| format!("${:.2}", p)).unwrap_or_else(|| "-".to_string()),
            seats: f
                .available_seats
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct BookingRow {
    #[tabled(rename = "Booking")]
    booking_id: String,
    #[tabled(rename = "Passenger")]
    passenger_name: String,
    #[tabled(rename = "Flight")]
    flight_number: String,
    #[tabled(rename = "Destination")]
    destination: String,
    #[tabled(rename = "Status")]
    status: String,
}

pub fn booking_table(bookings: &[BookingOverview]) -> String {
    let rows: Vec<BookingRow> = bookings
        .iter()
        .map(|b| BookingRow {
            booking_id: b.booking_id.clone(),
            passenger_name: b.passenger_name.clone(),
            flight_number: b.flight_number.clone(),
            destination: b.destination.clone(),
            status: match b.status {
                BookingStatus::Cancelled => b.status.style(theme().cancelled.clone()).to_string(),
                BookingStatus::Confirmed => b.status.to_string(),
            },
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::TableOutcome;

    #[test]
    fn test_empty_builder() {
        assert!(TableBuilder::new().build().is_empty());
        assert!(stats_table(&[("Flights", "10")]).contains("Flights"));
    }

    #[test]
    fn test_flight_table_renders_missing_values() {
        let flight = Flight::new("TA1", "Test Air", "Oslo", "Rome", "2025-01-01", "06:00", "09:30+1");
        let table = flight_table(&[flight]);
        assert!(table.contains("Oslo -> Rome"));
        assert!(table.contains("09:30+1"));
        assert!(table.contains('-'));
    }

    #[test]
    fn test_seed_report_table() {
        let report = SeedReport {
            flights: TableOutcome { inserted: 10, skipped: 0 },
            ..SeedReport::default()
        };
        let table = seed_report_table(&report);
        assert!(table.contains("flights"));
        assert!(table.contains("Inserted"));
    }
}
