//! Load results reported back to the caller

use serde::Serialize;

/// Rows inserted and skipped for one table during a seed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableOutcome {
    pub inserted: usize,
    pub skipped: usize,
}

impl TableOutcome {
    pub fn record(&mut self, inserted: bool) {
        if inserted {
            self.inserted += 1;
        } else {
            self.skipped += 1;
        }
    }
}

/// Per-table outcome of a seed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub flights: TableOutcome,
    pub bookings: TableOutcome,
    pub users: TableOutcome,
}

impl SeedReport {
    pub fn total_inserted(&self) -> usize {
        self.flights.inserted + self.bookings.inserted + self.users.inserted
    }

    pub fn total_skipped(&self) -> usize {
        self.flights.skipped + self.bookings.skipped + self.users.skipped
    }

    /// Rows per table, in load order
    pub fn tables(&self) -> [(&'static str, TableOutcome); 3] {
        [
            ("flights", self.flights),
            ("bookings", self.bookings),
            ("users", self.users),
        ]
    }
}

impl std::fmt::Display for SeedReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Seed Results:")?;
        for (table, outcome) in self.tables() {
            writeln!(
                f,
                "  {}: {} inserted, {} skipped",
                table, outcome.inserted, outcome.skipped
            )?;
        }
        Ok(())
    }
}

/// Row counts per table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    pub flights: usize,
    pub bookings: usize,
    pub users: usize,
}

impl std::fmt::Display for TableCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Flights: {}", self.flights)?;
        writeln!(f, "  Bookings: {}", self.bookings)?;
        writeln!(f, "  Users: {}", self.users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_record() {
        let mut report = SeedReport::default();
        report.flights.record(true);
        report.flights.record(false);
        report.users.record(false);

        assert_eq!(report.flights, TableOutcome { inserted: 1, skipped: 1 });
        assert_eq!(report.total_inserted(), 1);
        assert_eq!(report.total_skipped(), 2);
        assert!(report.to_string().contains("flights: 1 inserted, 1 skipped"));
    }
}
