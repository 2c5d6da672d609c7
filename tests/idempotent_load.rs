use travelseed::model::BookingStatus;
use travelseed::{ErrorKind, LoaderState, SchemaLoader, SeedSet, TableCounts, TravelStore};

#[test]
fn reload_from_disk_skips_everything() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("travel_info.db");

    {
        let mut loader = SchemaLoader::open(&db, SeedSet::travel_sample()).unwrap();
        let (report, counts) = loader.run().unwrap();
        assert_eq!(report.total_inserted(), 20);
        assert_eq!(counts, TableCounts { flights: 10, bookings: 5, users: 5 });
    }
    assert!(db.exists());

    let mut loader = SchemaLoader::open(&db, SeedSet::travel_sample()).unwrap();
    let (report, counts) = loader.run().unwrap();
    assert_eq!(report.total_inserted(), 0);
    assert_eq!(report.total_skipped(), 20);
    assert_eq!(counts, TableCounts { flights: 10, bookings: 5, users: 5 });
    assert_eq!(loader.state(), LoaderState::Populated);
}

#[test]
fn verification_queries_after_load() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("travel_info.db");

    let mut loader = SchemaLoader::open(&db, SeedSet::travel_sample()).unwrap();
    loader.run().unwrap();
    drop(loader);

    let store = TravelStore::open(&db).unwrap();
    store.ensure_schema().unwrap();

    let to_new_york = store.flights_to("New York").unwrap();
    assert!(to_new_york.iter().any(|f| f.flight_number == "BA456"
        && f.price == Some(599.99)
        && f.available_seats == Some(23)));

    let bookings = store.booking_overview().unwrap();
    assert_eq!(bookings.len(), 5);
    assert!(bookings
        .iter()
        .any(|b| b.booking_id == "BK003" && b.status == BookingStatus::Cancelled));

    assert_eq!(store.flights_with_seats_above(20).unwrap().len(), 7);
}

#[test]
fn garbage_file_is_not_silently_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("travel_info.db");
    std::fs::write(&db, "this is not a sqlite database\n".repeat(64)).unwrap();

    let result = SchemaLoader::open(&db, SeedSet::travel_sample()).and_then(|mut loader| loader.run());
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
}

#[test]
fn unopenable_path_is_storage_unavailable() {
    let dir = tempfile::tempdir().unwrap();

    let err = TravelStore::open(dir.path()).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::StorageUnavailable);

    let missing_parent = dir.path().join("missing").join("travel_info.db");
    let err = SchemaLoader::open(&missing_parent, SeedSet::travel_sample()).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::StorageUnavailable);
    assert!(err.to_string().contains("travel_info.db"));
}

#[test]
fn check_schema_leaves_partial_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("travel_info.db");

    let store = TravelStore::open(&db).unwrap();
    let err = store.check_schema().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
    assert!(store.table_columns("flights").unwrap().is_empty());
}

#[test]
fn seed_file_replaces_sample_data() {
    let dir = tempfile::tempdir().unwrap();
    let seed_path = dir.path().join("seed.toml");
    std::fs::write(
        &seed_path,
        r#"
        [[flights]]
        flight_number = "NZ1"
        airline = "Air New Zealand"
        origin = "Auckland"
        destination = "Los Angeles"
        date = "2024-11-01"
        departure_time = "19:30"
        arrival_time = "11:00"
        price = 1099.0
        available_seats = 3

        [[bookings]]
        booking_id = "BK100"
        flight_number = "NZ1"
        passenger_name = "Ari Ngata"
        passenger_email = "ari@example.com"
        booking_date = "2024-10-01"
        status = "cancelled"
        "#,
    )
    .unwrap();

    let seed = SeedSet::load(&seed_path).unwrap();
    let mut loader = SchemaLoader::new(TravelStore::open_in_memory().unwrap(), seed);
    let (report, counts) = loader.run().unwrap();

    assert_eq!(report.flights.inserted, 1);
    assert_eq!(report.bookings.inserted, 1);
    assert_eq!(counts, TableCounts { flights: 1, bookings: 1, users: 0 });
    assert!(loader.store().flights_with_seats_above(20).unwrap().is_empty());
}
