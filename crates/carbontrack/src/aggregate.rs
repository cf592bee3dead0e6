//! Footprint aggregation.
//!
//! Sums the CO2-equivalent of a user's activity records per category, per
//! month, and in total.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::activity::{ActivityRecord, Category};
use crate::goal::first_of_month;

/// Per-category and total CO2-equivalent over a set of records.
///
/// The category map is sparse: categories with no records have no entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FootprintSummary {
    /// Summed kg CO2e per category.
    pub per_category: BTreeMap<Category, f64>,
    /// Summed kg CO2e over all records.
    pub total: f64,
}

impl FootprintSummary {
    /// `true` when no records contributed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.per_category.is_empty()
    }

    /// Sum for one category, if any records had it.
    #[must_use]
    pub fn get(&self, category: Category) -> Option<f64> {
        self.per_category.get(&category).copied()
    }

    /// Add one record's contribution.
    pub fn add(&mut self, record: &ActivityRecord) {
        *self.per_category.entry(record.category()).or_insert(0.0) += record.co2_equivalent();
        self.total += record.co2_equivalent();
    }

    /// Fold another summary into this one, category-wise and in total.
    pub fn merge(&mut self, other: &FootprintSummary) {
        for (category, value) in &other.per_category {
            *self.per_category.entry(*category).or_insert(0.0) += value;
        }
        self.total += other.total;
    }

    /// Category with the largest sum.
    ///
    /// Ties go to the category that comes first in [`Category::ALL`]
    /// (Transport before Electricity), not alphabetically by label.
    #[must_use]
    pub fn dominant_category(&self) -> Option<Category> {
        let mut best: Option<(Category, f64)> = None;
        // BTreeMap iterates in enumeration order; strict `>` keeps the first maximum
        for (&category, &value) in &self.per_category {
            match best {
                Some((_, top)) if value <= top => {}
                _ => best = Some((category, value)),
            }
        }
        best.map(|(category, _)| category)
    }

    /// `(label, kg)` pairs in enumeration order, for charts and tables.
    #[must_use]
    pub fn labelled(&self) -> Vec<(&'static str, f64)> {
        self.per_category
            .iter()
            .map(|(category, value)| (category.label(), *value))
            .collect()
    }
}

/// Aggregate records into a [`FootprintSummary`].
///
/// When `window_start` is given only records dated on or after it count.
pub fn aggregate<'a, I>(records: I, window_start: Option<NaiveDate>) -> FootprintSummary
where
    I: IntoIterator<Item = &'a ActivityRecord>,
{
    let mut summary = FootprintSummary::default();
    for record in records {
        if window_start.is_some_and(|start| record.date() < start) {
            continue;
        }
        summary.add(record);
    }
    summary
}

/// Total kg CO2e per calendar month, keyed by the month's first day.
pub fn monthly_totals<'a, I>(records: I) -> BTreeMap<NaiveDate, f64>
where
    I: IntoIterator<Item = &'a ActivityRecord>,
{
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(first_of_month(record.date())).or_insert(0.0) += record.co2_equivalent();
    }
    totals
}
