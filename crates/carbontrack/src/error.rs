//! Error types for carbontrack.
//!
//! This module defines all error types used throughout the carbontrack crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for carbontrack operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Domain Errors ===
    /// A submitted activity failed input validation.
    #[error("invalid activity: {message}")]
    InvalidActivity {
        /// Why the activity was rejected.
        message: String,
    },

    /// A goal target that is negative or not a number.
    #[error("invalid goal: {message}")]
    InvalidGoal {
        /// Why the goal was rejected.
        message: String,
    },

    /// A category label outside the known set.
    #[error("unknown category '{0}' (expected transport, electricity, food or waste)")]
    UnknownCategory(String),

    /// A month string that could not be parsed.
    #[error("invalid month '{0}' (expected YYYY-MM or YYYY-MM-DD)")]
    InvalidMonth(String),

    /// No activity with this id belongs to the owner.
    #[error("activity {id} not found")]
    ActivityNotFound {
        /// The requested activity id.
        id: i64,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV export failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for carbontrack operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new invalid activity error.
    #[must_use]
    pub fn invalid_activity(message: impl Into<String>) -> Self {
        Self::InvalidActivity {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error means the requested record does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ActivityNotFound { .. })
    }

    /// Check if this error was caused by rejected user input.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidActivity { .. }
                | Self::InvalidGoal { .. }
                | Self::UnknownCategory(_)
                | Self::InvalidMonth(_)
        )
    }
}
