//! Database schema definitions

/// SQL to create the flights table
pub const CREATE_FLIGHTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS flights (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    flight_number TEXT NOT NULL,
    airline TEXT NOT NULL,
    destination TEXT NOT NULL,
    origin TEXT NOT NULL,
    date TEXT NOT NULL,
    departure_time TEXT NOT NULL,
    arrival_time TEXT NOT NULL,
    price REAL,
    available_seats INTEGER
)
"#;

/// SQL to create the bookings table
/// flight_number is a logical reference to flights, checked by the loader
pub const CREATE_BOOKINGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS bookings (
    booking_id TEXT PRIMARY KEY,
    flight_number TEXT NOT NULL,
    passenger_name TEXT NOT NULL,
    passenger_email TEXT NOT NULL,
    booking_date TEXT NOT NULL,
    status TEXT DEFAULT 'confirmed'
)
"#;

/// SQL to create the users table
pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    user_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT UNIQUE NOT NULL,
    phone TEXT,
    preferences TEXT,
    created_date TEXT DEFAULT CURRENT_TIMESTAMP
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_flights_number ON flights(flight_number)",
    "CREATE INDEX IF NOT EXISTS idx_flights_destination ON flights(destination)",
];

/// All schema creation statements, tables before indexes
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_FLIGHTS_TABLE, CREATE_BOOKINGS_TABLE, CREATE_USERS_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}

/// Expected shape of a table: its columns, which one is the primary key,
/// and which columns must carry their own unique index
#[derive(Debug, Clone, Copy)]
pub struct TableShape {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub primary_key: &'static str,
    pub unique: &'static [&'static str],
}

pub const FLIGHTS: TableShape = TableShape {
    name: "flights",
    columns: &[
        "id",
        "flight_number",
        "airline",
        "destination",
        "origin",
        "date",
        "departure_time",
        "arrival_time",
        "price",
        "available_seats",
    ],
    primary_key: "id",
    unique: &[],
};

pub const BOOKINGS: TableShape = TableShape {
    name: "bookings",
    columns: &[
        "booking_id",
        "flight_number",
        "passenger_name",
        "passenger_email",
        "booking_date",
        "status",
    ],
    primary_key: "booking_id",
    unique: &[],
};

pub const USERS: TableShape = TableShape {
    name: "users",
    columns: &["user_id", "name", "email", "phone", "preferences", "created_date"],
    primary_key: "user_id",
    unique: &["email"],
};

/// Every table the loader owns
pub const TABLES: &[TableShape] = &[FLIGHTS, BOOKINGS, USERS];

impl TableShape {
    /// Compare the columns found in the database against this shape.
    ///
    /// `found` holds `(column name, is primary key)` pairs as reported by
    /// `pragma_table_info`; `unique` lists the columns covered on their own
    /// by a unique index. Returns a description of the first mismatch.
    pub fn mismatch(&self, found: &[(String, bool)], unique: &[String]) -> Option<String> {
        let missing: Vec<&str> = self
            .columns
            .iter()
            .copied()
            .filter(|col| !found.iter().any(|(name, _)| name == col))
            .collect();
        if !missing.is_empty() {
            return Some(format!("missing columns: {}", missing.join(", ")));
        }

        let unexpected: Vec<&str> = found
            .iter()
            .map(|(name, _)| name.as_str())
            .filter(|name| !self.columns.contains(name))
            .collect();
        if !unexpected.is_empty() {
            return Some(format!("unexpected columns: {}", unexpected.join(", ")));
        }

        let keys: Vec<&str> = found
            .iter()
            .filter(|(_, pk)| *pk)
            .map(|(name, _)| name.as_str())
            .collect();
        if keys != [self.primary_key] {
            return Some(format!(
                "primary key is ({}), expected ({})",
                keys.join(", "),
                self.primary_key
            ));
        }

        let not_unique: Vec<&str> = self
            .unique
            .iter()
            .copied()
            .filter(|col| !unique.iter().any(|name| name == col))
            .collect();
        if !not_unique.is_empty() {
            return Some(format!("missing unique constraint on: {}", not_unique.join(", ")));
        }

        None
    }
}
