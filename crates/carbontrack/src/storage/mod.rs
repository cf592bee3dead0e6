//! Storage layer for carbontrack.
//!
//! This module provides `SQLite`-based persistent storage for activity
//! records and monthly goals. Every query is scoped to a single owner.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::activity::{ActivityRecord, Category, NewActivity};
use crate::error::{Error, Result};
use crate::goal::{first_of_month, MonthlyGoal};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage engine for activities and goals.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    // === Activities ===

    /// Record an activity for `owner`.
    ///
    /// The CO2-equivalent is computed here, once, from the submission.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn insert_activity(&self, owner: &str, activity: &NewActivity) -> Result<ActivityRecord> {
        let record = ActivityRecord::from_new(owner, activity);

        self.conn.execute(
            r"
            INSERT INTO activities (owner, date, category, raw_value, co2_equivalent)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
            params![
                record.owner(),
                record.date().format(DATE_FORMAT).to_string(),
                record.category().key(),
                record.raw_value(),
                record.co2_equivalent(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!(
            id,
            owner,
            category = %record.category(),
            co2 = record.co2_equivalent(),
            "Inserted activity"
        );
        Ok(record.with_id(id))
    }

    /// Get one of `owner`'s activities by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails or the row is corrupt.
    pub fn get_activity(&self, owner: &str, id: i64) -> Result<Option<ActivityRecord>> {
        let row = self
            .conn
            .query_row(
                r"
                SELECT id, owner, date, category, raw_value
                FROM activities WHERE owner = ?1 AND id = ?2
                ",
                params![owner, id],
                ActivityRow::from_row,
            )
            .optional()?;
        row.map(ActivityRow::into_record).transpose()
    }

    /// Delete one of `owner`'s activities.
    ///
    /// Returns `true` if a record was deleted, `false` if no record with
    /// this id belongs to `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete_activity(&self, owner: &str, id: i64) -> Result<bool> {
        let affected = self.conn.execute(
            "DELETE FROM activities WHERE owner = ?1 AND id = ?2",
            params![owner, id],
        )?;
        if affected > 0 {
            info!(id, owner, "Deleted activity");
        }
        Ok(affected > 0)
    }

    /// List `owner`'s activities, oldest first.
    ///
    /// With `since`, only activities dated on or after that day are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails or a row is corrupt.
    pub fn list_activities(
        &self,
        owner: &str,
        since: Option<NaiveDate>,
    ) -> Result<Vec<ActivityRecord>> {
        let since_str = since.map(|d| d.format(DATE_FORMAT).to_string());
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, owner, date, category, raw_value
            FROM activities
            WHERE owner = ?1 AND (?2 IS NULL OR date >= ?2)
            ORDER BY date ASC, id ASC
            ",
        )?;

        let rows = stmt
            .query_map(params![owner, since_str], ActivityRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter().map(ActivityRow::into_record).collect()
    }

    /// Get `owner`'s most recent activities, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails or a row is corrupt.
    pub fn recent_activities(&self, owner: &str, limit: usize) -> Result<Vec<ActivityRecord>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, owner, date, category, raw_value
            FROM activities WHERE owner = ?1
            ORDER BY date DESC, id DESC LIMIT ?2
            ",
        )?;

        let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map(params![owner, limit_i64], ActivityRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter().map(ActivityRow::into_record).collect()
    }

    /// Count `owner`'s activities.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count_activities(&self, owner: &str) -> Result<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM activities WHERE owner = ?1",
            [owner],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    // === Goals ===

    /// Get `owner`'s goal for the month containing `month`, creating it with
    /// a zero target if none exists.
    ///
    /// Creation is a single `INSERT .. ON CONFLICT DO NOTHING`, so two
    /// concurrent first visits cannot produce duplicate goals.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn ensure_goal(&self, owner: &str, month: NaiveDate) -> Result<MonthlyGoal> {
        let month = first_of_month(month);
        let created = self.conn.execute(
            r"
            INSERT INTO goals (owner, month, target_kg) VALUES (?1, ?2, 0)
            ON CONFLICT(owner, month) DO NOTHING
            ",
            params![owner, month.format(DATE_FORMAT).to_string()],
        )?;
        if created > 0 {
            debug!(owner, %month, "Created default goal");
        }

        self.get_goal(owner, month)?
            .ok_or_else(|| Error::internal(format!("goal for {owner} {month} vanished after insert")))
    }

    /// Set `owner`'s target for the month containing `month`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGoal`] for a negative or non-finite target,
    /// or an error if the database operation fails.
    pub fn set_goal(&self, owner: &str, month: NaiveDate, target_kg: f64) -> Result<MonthlyGoal> {
        if !target_kg.is_finite() || target_kg < 0.0 {
            return Err(Error::InvalidGoal {
                message: format!("target must be a non-negative number, got {target_kg}"),
            });
        }

        let goal = MonthlyGoal::new(owner, month, target_kg);
        self.conn.execute(
            r"
            INSERT INTO goals (owner, month, target_kg) VALUES (?1, ?2, ?3)
            ON CONFLICT(owner, month)
            DO UPDATE SET target_kg = excluded.target_kg, updated_at = datetime('now')
            ",
            params![
                goal.owner,
                goal.month.format(DATE_FORMAT).to_string(),
                goal.target_kg
            ],
        )?;

        info!(owner, month = %goal.month, target_kg, "Goal updated");
        Ok(goal)
    }

    /// Get `owner`'s goal for the month containing `month`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails or the row is corrupt.
    pub fn get_goal(&self, owner: &str, month: NaiveDate) -> Result<Option<MonthlyGoal>> {
        let month = first_of_month(month);
        let target: Option<f64> = self
            .conn
            .query_row(
                "SELECT target_kg FROM goals WHERE owner = ?1 AND month = ?2",
                params![owner, month.format(DATE_FORMAT).to_string()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(target.map(|target_kg| MonthlyGoal::new(owner, month, target_kg)))
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let (total_activities, owners, oldest, newest): (
            i64,
            i64,
            Option<String>,
            Option<String>,
        ) = self.conn.query_row(
            "SELECT COUNT(*), COUNT(DISTINCT owner), MIN(date), MAX(date) FROM activities",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )?;

        let total_goals: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM goals", [], |row| row.get(0))?;

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            total_activities,
            owners,
            total_goals,
            oldest_activity: oldest.and_then(|s| parse_date(&s).ok()),
            newest_activity: newest.and_then(|s| parse_date(&s).ok()),
            db_size_bytes,
        })
    }
}

/// Raw activity columns, before category and date are validated.
struct ActivityRow {
    id: i64,
    owner: String,
    date: String,
    category: String,
    raw_value: f64,
}

impl ActivityRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            owner: row.get(1)?,
            date: row.get(2)?,
            category: row.get(3)?,
            raw_value: row.get(4)?,
        })
    }

    /// Rebuild the record, recomputing CO2 from category and raw value.
    fn into_record(self) -> Result<ActivityRecord> {
        let category: Category = self.category.parse()?;
        let date = parse_date(&self.date)?;
        Ok(ActivityRecord::new(self.owner, date, category, self.raw_value).with_id(self.id))
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| Error::internal(format!("invalid stored date '{s}': {e}")))
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Total number of activities stored, across all owners.
    pub total_activities: i64,
    /// Number of distinct owners with activities.
    pub owners: i64,
    /// Total number of monthly goals.
    pub total_goals: i64,
    /// Date of the oldest activity.
    pub oldest_activity: Option<NaiveDate>,
    /// Date of the newest activity.
    pub newest_activity: Option<NaiveDate>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}
