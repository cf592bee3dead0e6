//! Core activity types for carbontrack.
//!
//! An activity is one user-submitted measurement (kilometres driven, kWh
//! used, kilograms of food or waste) together with its derived
//! CO2-equivalent mass.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculator;
use crate::error::{Error, Result};

/// The kind of activity being logged.
///
/// Variant order is the enumeration order used wherever categories are
/// listed or ties must be broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Travel, measured in kilometres.
    Transport,
    /// Electricity use, measured in kWh.
    Electricity,
    /// Food consumed, measured in kilograms.
    Food,
    /// Waste produced, measured in kilograms.
    Waste,
}

impl Category {
    /// Every category, in enumeration order.
    pub const ALL: [Category; 4] = [
        Category::Transport,
        Category::Electricity,
        Category::Food,
        Category::Waste,
    ];

    /// Lower-case key used in storage and on the command line.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Electricity => "electricity",
            Self::Food => "food",
            Self::Waste => "waste",
        }
    }

    /// Human-readable label (`"Transport"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Transport => "Transport",
            Self::Electricity => "Electricity",
            Self::Food => "Food",
            Self::Waste => "Waste",
        }
    }

    /// Unit the raw value is measured in.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Transport => "km",
            Self::Electricity => "kWh",
            Self::Food | Self::Waste => "kg",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(needle))
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

/// A validated activity submission, not yet persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewActivity {
    /// Day the activity happened.
    pub date: NaiveDate,
    /// What kind of activity it was.
    pub category: Category,
    /// Magnitude in the category's unit.
    pub raw_value: f64,
}

impl NewActivity {
    /// Validate a submission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidActivity`] if `raw_value` is not finite or is
    /// negative.
    pub fn new(date: NaiveDate, category: Category, raw_value: f64) -> Result<Self> {
        if !raw_value.is_finite() {
            return Err(Error::invalid_activity(format!(
                "value must be a finite number, got {raw_value}"
            )));
        }
        if raw_value < 0.0 {
            return Err(Error::invalid_activity(format!(
                "value must not be negative, got {raw_value}"
            )));
        }
        Ok(Self {
            date,
            category,
            raw_value,
        })
    }

    /// CO2-equivalent this activity will be recorded with.
    #[must_use]
    pub fn co2_equivalent(&self) -> f64 {
        calculator::co2_equivalent(self.category, self.raw_value)
    }
}

/// A logged activity.
///
/// `co2_equivalent` is derived from `category` and `raw_value` at
/// construction and cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityRecord {
    id: Option<i64>,
    owner: String,
    date: NaiveDate,
    category: Category,
    raw_value: f64,
    co2_equivalent: f64,
}

impl ActivityRecord {
    /// Create an unsaved record, computing its CO2-equivalent.
    #[must_use]
    pub fn new(owner: impl Into<String>, date: NaiveDate, category: Category, raw_value: f64) -> Self {
        Self {
            id: None,
            owner: owner.into(),
            date,
            category,
            raw_value,
            co2_equivalent: calculator::co2_equivalent(category, raw_value),
        }
    }

    /// Create an unsaved record from a validated submission.
    #[must_use]
    pub fn from_new(owner: impl Into<String>, activity: &NewActivity) -> Self {
        Self::new(owner, activity.date, activity.category, activity.raw_value)
    }

    /// Attach the id assigned by storage.
    #[must_use]
    pub(crate) fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Storage id, `None` until saved.
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Owner the record is attributed to.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Day the activity happened.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Activity category.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Magnitude in the category's unit.
    #[must_use]
    pub fn raw_value(&self) -> f64 {
        self.raw_value
    }

    /// Kilograms of CO2-equivalent.
    #[must_use]
    pub fn co2_equivalent(&self) -> f64 {
        self.co2_equivalent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Transport.to_string(), "transport");
        assert_eq!(Category::Electricity.to_string(), "electricity");
        assert_eq!(Category::Food.to_string(), "food");
        assert_eq!(Category::Waste.to_string(), "waste");
    }

    #[test]
    fn test_category_labels_and_units() {
        assert_eq!(Category::Electricity.label(), "Electricity");
        assert_eq!(Category::Electricity.unit(), "kWh");
        assert_eq!(Category::Transport.unit(), "km");
        assert_eq!(Category::Waste.unit(), "kg");
    }

    #[test]
    fn test_category_parse_case_insensitive() {
        assert_eq!("food".parse::<Category>().unwrap(), Category::Food);
        assert_eq!("Transport".parse::<Category>().unwrap(), Category::Transport);
        assert_eq!(" WASTE ".parse::<Category>().unwrap(), Category::Waste);
    }

    #[test]
    fn test_category_parse_unknown() {
        let err = "plastic".parse::<Category>().unwrap_err();
        assert!(matches!(err, Error::UnknownCategory(ref s) if s == "plastic"));
    }

    #[test]
    fn test_category_order_matches_all() {
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);
    }

    #[test]
    fn test_category_serde_uses_key() {
        let json = serde_json::to_string(&Category::Electricity).unwrap();
        assert_eq!(json, "\"electricity\"");
        let parsed: Category = serde_json::from_str("\"waste\"").unwrap();
        assert_eq!(parsed, Category::Waste);
    }

    #[test]
    fn test_new_activity_rejects_negative() {
        let err = NewActivity::new(date(2024, 5, 1), Category::Food, -1.0).unwrap_err();
        assert!(err.is_input_error());
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_new_activity_rejects_non_finite() {
        assert!(NewActivity::new(date(2024, 5, 1), Category::Food, f64::NAN).is_err());
        assert!(NewActivity::new(date(2024, 5, 1), Category::Food, f64::INFINITY).is_err());
    }

    #[test]
    fn test_new_activity_accepts_zero() {
        let activity = NewActivity::new(date(2024, 5, 1), Category::Waste, 0.0).unwrap();
        assert_eq!(activity.co2_equivalent(), 0.0);
    }

    #[test]
    fn test_record_derives_co2() {
        let record = ActivityRecord::new("alice", date(2024, 5, 1), Category::Transport, 10.0);
        assert!(record.id().is_none());
        assert_eq!(record.owner(), "alice");
        assert_eq!(record.co2_equivalent(), 2.1);
    }

    #[test]
    fn test_record_from_new() {
        let activity = NewActivity::new(date(2024, 5, 2), Category::Food, 2.0).unwrap();
        let record = ActivityRecord::from_new("bob", &activity).with_id(3);
        assert_eq!(record.id(), Some(3));
        assert_eq!(record.date(), date(2024, 5, 2));
        assert_eq!(record.category(), Category::Food);
        assert_eq!(record.raw_value(), 2.0);
        assert_eq!(record.co2_equivalent(), 10.0);
    }

    #[test]
    fn test_record_serialization() {
        let record = ActivityRecord::new("alice", date(2024, 5, 1), Category::Food, 1.0);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["category"], "food");
        assert_eq!(json["date"], "2024-05-01");
        assert_eq!(json["co2_equivalent"], 5.0);
    }
}
