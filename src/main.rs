//! Travelseed CLI - initialize and verify the travel_info database

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use travelseed::config::{self, TravelseedConfig};
use travelseed::output::{emit_failure, emit_success, OutputMode};
use travelseed::ui::{self, Icons};
use travelseed::{BookingOverview, Flight, SchemaLoader, SeedReport, SeedSet, TableCounts, TravelStore};

const VERIFY_DESTINATION: &str = "New York";
const VERIFY_MIN_SEATS: u32 = 20;

#[derive(Parser)]
#[command(name = "travelseed")]
#[command(version)]
#[command(about = "Create and seed the travel_info SQLite database")]
#[command(long_about = r#"
Travelseed creates the flights, bookings and users tables, inserts the seed
rows, and prints verification queries. Re-running it is safe: rows that
already exist are skipped.

Example usage:
  travelseed
  travelseed --database data/travel_info.db load
  travelseed --seed my_seed.toml --json
  travelseed stats
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the database file [default: travel_info.db]
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to a config file [default: travelseed.toml, if present]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// TOML seed set to load instead of the built-in sample data
    #[arg(short, long, global = true)]
    seed: Option<PathBuf>,

    /// Emit machine-readable JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Ensure the schema, insert seed rows, and run the verification queries (default)
    Load,

    /// Show row counts per table
    Stats,

    /// Run the verification queries only
    Verify,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Load => "load",
            Commands::Stats => "stats",
            Commands::Verify => "verify",
        }
    }
}

#[derive(Serialize)]
struct Verification {
    flights_to_destination: Vec<Flight>,
    bookings: Vec<BookingOverview>,
    flights_with_seats: Vec<Flight>,
}

#[derive(Serialize)]
struct LoadOutput<'a> {
    database: &'a Path,
    report: SeedReport,
    counts: TableCounts,
    verification: Verification,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let command = cli.command.unwrap_or(Commands::Load);
    let output_mode = OutputMode::from_flag(cli.json);

    match run(&cli, command, output_mode) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = format!("{:#}", e);
            if output_mode.is_human() {
                ui::error(&message);
            } else if emit_failure(command.name(), &message).is_err() {
                eprintln!("{}", message);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, command: Commands, output_mode: OutputMode) -> anyhow::Result<()> {
    let file_config = config::load_config(cli.config.as_deref())?;
    let database = config::resolve_database(cli.database.clone(), file_config.as_ref());

    match command {
        Commands::Load => run_load(cli, file_config.as_ref(), &database, output_mode),
        Commands::Stats => run_stats(&database, output_mode),
        Commands::Verify => run_verify(&database, output_mode),
    }
}

fn load_seed(cli: &Cli, file_config: Option<&TravelseedConfig>) -> anyhow::Result<SeedSet> {
    match config::resolve_seed(cli.seed.clone(), file_config) {
        Some(path) => {
            tracing::info!("Loading seed set from {}", path.display());
            Ok(SeedSet::load(&path)?)
        }
        None => Ok(SeedSet::travel_sample()),
    }
}

fn run_load(
    cli: &Cli,
    file_config: Option<&TravelseedConfig>,
    database: &Path,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let seed = load_seed(cli, file_config)?;
    config::ensure_db_dir(database)?;

    tracing::info!("Loading {} seed rows into {:?}", seed.len(), database);
    let mut loader = SchemaLoader::open(database, seed)?;
    let (report, counts) = loader
        .run()
        .with_context(|| format!("failed to initialize {}", database.display()))?;
    let verification = verify(loader.store())?;

    if !output_mode.is_human() {
        let data = LoadOutput { database, report, counts, verification };
        return emit_success("load", data);
    }

    ui::header(&format!("Initializing {}", database.display()));
    ui::phase("Schema ensured");
    ui::phase("Seed data committed");

    ui::section(Icons::DATABASE, "Seed results");
    println!("{}", ui::seed_report_table(&report));
    print_counts(&counts);

    print_verification(&verification);

    println!();
    ui::success("Setup complete!");
    ui::info("Database", &database.display().to_string());
    Ok(())
}

fn run_stats(database: &Path, output_mode: OutputMode) -> anyhow::Result<()> {
    let store = open_existing(database)?;
    let counts = store.counts()?;

    if !output_mode.is_human() {
        return emit_success("stats", counts);
    }

    ui::header(&format!("Statistics ({})", database.display()));
    print_counts(&counts);
    Ok(())
}

fn run_verify(database: &Path, output_mode: OutputMode) -> anyhow::Result<()> {
    let store = open_existing(database)?;
    let verification = verify(&store)?;

    if !output_mode.is_human() {
        return emit_success("verify", verification);
    }

    print_verification(&verification);
    Ok(())
}

/// Open a database that should already exist, checking its shape without writing
fn open_existing(database: &Path) -> anyhow::Result<TravelStore> {
    if !database.exists() {
        anyhow::bail!(
            "database {} does not exist (run `travelseed load` first)",
            database.display()
        );
    }
    let store = TravelStore::open(database)?;
    store.check_schema()?;
    Ok(store)
}

fn verify(store: &TravelStore) -> anyhow::Result<Verification> {
    Ok(Verification {
        flights_to_destination: store.flights_to(VERIFY_DESTINATION)?,
        bookings: store.booking_overview()?,
        flights_with_seats: store.flights_with_seats_above(VERIFY_MIN_SEATS)?,
    })
}

fn print_counts(counts: &TableCounts) {
    ui::section(Icons::STATS, "Row counts");
    println!(
        "{}",
        ui::stats_table(&[
            ("Flights", counts.flights.to_string().as_str()),
            ("Bookings", counts.bookings.to_string().as_str()),
            ("Users", counts.users.to_string().as_str()),
        ])
    );
}

fn print_verification(verification: &Verification) {
    ui::section(Icons::PLANE, &format!("Flights to {}", VERIFY_DESTINATION));
    print_flights(&verification.flights_to_destination);

    ui::section(Icons::TICKET, "Current bookings");
    if verification.bookings.is_empty() {
        ui::summary_row("∅", "No bookings found.");
    } else {
        println!("{}", ui::booking_table(&verification.bookings));
    }

    ui::section(Icons::SEAT, &format!("Flights with more than {} seats available", VERIFY_MIN_SEATS));
    print_flights(&verification.flights_with_seats);
}

fn print_flights(flights: &[Flight]) {
    if flights.is_empty() {
        ui::summary_row("∅", "No flights found.");
    } else {
        println!("{}", ui::flight_table(flights));
    }
}
