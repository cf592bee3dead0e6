//! Monthly footprint goals.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A user's CO2 ceiling for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyGoal {
    /// Owner the goal belongs to.
    pub owner: String,
    /// First day of the month the goal applies to.
    pub month: NaiveDate,
    /// Target footprint in kg CO2e. Zero means "not set yet".
    pub target_kg: f64,
}

impl MonthlyGoal {
    /// Create a goal, normalising `month` to the first of its month.
    #[must_use]
    pub fn new(owner: impl Into<String>, month: NaiveDate, target_kg: f64) -> Self {
        Self {
            owner: owner.into(),
            month: first_of_month(month),
            target_kg,
        }
    }

    /// Whether a positive target has been chosen.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.target_kg > 0.0
    }

    /// Compare this goal against the footprint accumulated so far.
    #[must_use]
    pub fn progress(&self, actual_kg: f64) -> GoalProgress {
        GoalProgress {
            goal: self.clone(),
            actual_kg,
            remaining_kg: (self.target_kg - actual_kg).max(0.0),
            exceeded: self.is_set() && actual_kg > self.target_kg,
        }
    }
}

/// How a month's footprint compares to its goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    /// The goal being tracked.
    pub goal: MonthlyGoal,
    /// Footprint so far this month.
    pub actual_kg: f64,
    /// Headroom left before the target is reached (never negative).
    pub remaining_kg: f64,
    /// `true` once a set target has been passed.
    pub exceeded: bool,
}

impl GoalProgress {
    /// Share of the target used so far, `None` when no target is set.
    #[must_use]
    pub fn percent_used(&self) -> Option<f64> {
        self.goal
            .is_set()
            .then(|| self.actual_kg / self.goal.target_kg * 100.0)
    }
}

/// First day of the month containing `date`.
#[must_use]
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Parse `YYYY-MM` or `YYYY-MM-DD` into the first day of that month.
///
/// # Errors
///
/// Returns [`Error::InvalidMonth`] if the string is neither form.
pub fn parse_month(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .map(first_of_month)
        .map_err(|_| Error::InvalidMonth(input.to_string()))
}
