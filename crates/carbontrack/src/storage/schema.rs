//! `SQLite` schema definitions for carbontrack.

/// SQL statement to create the activities table.
///
/// `date` is stored as `YYYY-MM-DD` so string comparison orders by day.
pub const CREATE_ACTIVITIES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS activities (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner TEXT NOT NULL,
    date TEXT NOT NULL,
    category TEXT NOT NULL,
    raw_value REAL NOT NULL,
    co2_equivalent REAL NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// Index for per-owner date-windowed listing.
pub const CREATE_OWNER_DATE_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_activities_owner_date ON activities(owner, date)
";

/// Index for per-owner category queries.
pub const CREATE_OWNER_CATEGORY_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_activities_owner_category ON activities(owner, category)
";

/// SQL statement to create the monthly goals table.
///
/// The `UNIQUE(owner, month)` constraint backs goal upserts.
pub const CREATE_GOALS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS goals (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner TEXT NOT NULL,
    month TEXT NOT NULL,
    target_kg REAL NOT NULL DEFAULT 0,
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE(owner, month)
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_ACTIVITIES_TABLE,
    CREATE_OWNER_DATE_INDEX,
    CREATE_OWNER_CATEGORY_INDEX,
    CREATE_GOALS_TABLE,
    CREATE_METADATA_TABLE,
];
