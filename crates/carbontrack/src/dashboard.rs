//! Dashboard assembly.
//!
//! Collects everything the dashboard view shows for one owner: recent
//! activity, all-time and current-month footprints, monthly history, goal
//! progress and tips.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::activity::ActivityRecord;
use crate::aggregate::{aggregate, monthly_totals, FootprintSummary};
use crate::error::Result;
use crate::goal::{first_of_month, GoalProgress};
use crate::storage::Storage;
use crate::tips::select_tips;

/// Footprint for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotal {
    /// First day of the month.
    pub month: NaiveDate,
    /// kg CO2e logged in that month.
    pub total_kg: f64,
}

/// Everything shown on an owner's dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// Owner the dashboard belongs to.
    pub owner: String,
    /// Day the dashboard was built for.
    pub today: NaiveDate,
    /// Most recent activities, newest first.
    pub recent: Vec<ActivityRecord>,
    /// All-time footprint.
    pub all_time: FootprintSummary,
    /// Footprint since the first of the current month.
    pub current_month: FootprintSummary,
    /// Footprint per month, oldest first.
    pub monthly: Vec<MonthTotal>,
    /// Progress against this month's goal, if one exists.
    pub goal: Option<GoalProgress>,
    /// Reduction tips for the all-time dominant category.
    pub tips: Vec<String>,
}

impl Dashboard {
    /// Build the dashboard for `owner` as of `today`.
    ///
    /// Reads only; a missing goal is reported as `None`, not created.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from storage fails.
    pub fn build(
        storage: &Storage,
        owner: &str,
        today: NaiveDate,
        recent_limit: usize,
    ) -> Result<Self> {
        let records = storage.list_activities(owner, None)?;
        let recent = storage.recent_activities(owner, recent_limit)?;
        let month_start = first_of_month(today);

        let all_time = aggregate(&records, None);
        // Later-dated records must not leak into this month
        let current_month = aggregate(
            records
                .iter()
                .filter(|r| first_of_month(r.date()) == month_start),
            Some(month_start),
        );
        let monthly = monthly_totals(&records)
            .into_iter()
            .map(|(month, total_kg)| MonthTotal { month, total_kg })
            .collect();
        let goal = storage
            .get_goal(owner, month_start)?
            .map(|goal| goal.progress(current_month.total));
        let tips = select_tips(&all_time);

        debug!(
            owner,
            records = records.len(),
            total = all_time.total,
            "Built dashboard"
        );

        Ok(Self {
            owner: owner.to_string(),
            today,
            recent,
            all_time,
            current_month,
            monthly,
            goal,
            tips,
        })
    }

    /// All-time total in kg CO2e.
    #[must_use]
    pub fn total_kg(&self) -> f64 {
        self.all_time.total
    }
}
