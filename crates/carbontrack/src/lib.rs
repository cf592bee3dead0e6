//! `carbontrack` - A personal carbon footprint tracker
//!
//! This library converts logged activities (transport, electricity, food,
//! waste) into kilograms of CO2-equivalent, stores them per owner in
//! `SQLite`, and summarises them into totals, monthly goals and tips.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod activity;
pub mod aggregate;
pub mod calculator;
pub mod chart;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod goal;
pub mod logging;
pub mod storage;
pub mod tips;

pub use activity::{ActivityRecord, Category, NewActivity};
pub use aggregate::{aggregate, monthly_totals, FootprintSummary};
pub use calculator::{co2_equivalent, co2_equivalent_for};
pub use config::Config;
pub use dashboard::Dashboard;
pub use error::{Error, Result};
pub use goal::{GoalProgress, MonthlyGoal};
pub use logging::init_logging;
pub use storage::{Storage, StorageStats};
pub use tips::select_tips;
