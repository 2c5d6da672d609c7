//! Terminal presentation for the CLI: icons, colors, and tables

pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{error, header, info, phase, section, success, summary_row};
pub use table::{TableBuilder, booking_table, flight_table, seed_report_table, stats_table};
pub use theme::{theme, Theme};
