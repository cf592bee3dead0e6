//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use crate::activity::Category;

/// Log an activity.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Activity category
    #[arg(value_enum)]
    pub category: CategoryArg,

    /// Amount in the category's unit (km, kWh, kg, kg)
    #[arg(allow_negative_numbers = true)]
    pub value: f64,

    /// Day of the activity, YYYY-MM-DD (defaults to today)
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

/// Delete a logged activity.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Id of the activity to delete
    pub id: i64,
}

/// List logged activities.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only show activities on or after this day (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub since: Option<NaiveDate>,

    /// Maximum number of results (newest first when set)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Dashboard command arguments.
#[derive(Debug, Args)]
pub struct DashboardCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Skip the bar chart
    #[arg(long)]
    pub no_chart: bool,
}

/// Monthly goal commands.
#[derive(Debug, Subcommand)]
pub enum GoalCommand {
    /// Set the footprint target for a month
    Set {
        /// Target footprint in kg CO2e
        target_kg: f64,

        /// Month, YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show a month's goal and progress
    Show {
        /// Month, YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// File to write (defaults to my_footprint.csv)
    #[arg(short, long, value_name = "FILE", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Write CSV to standard output instead of a file
    #[arg(long)]
    pub stdout: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Category argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    /// Travel, in km
    Transport,
    /// Electricity, in kWh
    Electricity,
    /// Food, in kg
    Food,
    /// Waste, in kg
    Waste,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Transport => Self::Transport,
            CategoryArg::Electricity => Self::Electricity,
            CategoryArg::Food => Self::Food,
            CategoryArg::Waste => Self::Waste,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}
