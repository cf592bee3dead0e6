//! Command-line interface for carbontrack.
//!
//! This module provides the CLI structure for the `carbon` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, CategoryArg, ConfigCommand, DashboardCommand, DeleteCommand, ExportCommand,
    GoalCommand, ListCommand, OutputFormat, StatusCommand,
};

/// carbon - Track your personal carbon footprint
///
/// Log transport, electricity, food and waste, and see what they add up to
/// in kilograms of CO2-equivalent.
#[derive(Debug, Parser)]
#[command(name = "carbon")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Owner to record and report for (overrides config and $USER)
    #[arg(short, long, global = true, value_name = "OWNER")]
    pub user: Option<String>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors (command output is still printed)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log an activity
    Add(AddCommand),

    /// Delete a logged activity
    Delete(DeleteCommand),

    /// List logged activities
    List(ListCommand),

    /// Show totals, chart, goal progress and tips
    Dashboard(DashboardCommand),

    /// Set or show monthly goals
    #[command(subcommand)]
    Goal(GoalCommand),

    /// Export activities as CSV
    Export(ExportCommand),

    /// Show database status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "carbon");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        use crate::logging::Verbosity;

        assert_eq!(parse(&["carbon", "-q", "status"]).verbosity(), Verbosity::Quiet);
        assert_eq!(parse(&["carbon", "status"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["carbon", "-v", "status"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["carbon", "-vv", "status"]).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_quiet_help_describes_logging() {
        let cmd = Cli::command();
        let quiet = cmd
            .get_arguments()
            .find(|arg| arg.get_id() == "quiet")
            .unwrap();
        let help = quiet.get_help().unwrap().to_string();
        assert!(help.contains("log"));
        assert!(!help.contains("Suppress all output"));
    }

    #[test]
    fn test_parse_add() {
        let cli = parse(&["carbon", "add", "transport", "12.5", "--date", "2024-05-01"]);
        let Command::Add(add) = cli.command else {
            panic!("expected add command");
        };
        assert_eq!(add.category, CategoryArg::Transport);
        assert_eq!(add.value, 12.5);
        assert_eq!(add.date, chrono::NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    #[test]
    fn test_parse_add_rejects_unknown_category() {
        assert!(Cli::try_parse_from(["carbon", "add", "plastic", "1"]).is_err());
    }

    #[test]
    fn test_parse_add_rejects_bad_date() {
        assert!(Cli::try_parse_from(["carbon", "add", "food", "1", "--date", "May 1"]).is_err());
    }

    #[test]
    fn test_parse_delete() {
        let cli = parse(&["carbon", "delete", "42"]);
        assert!(matches!(cli.command, Command::Delete(DeleteCommand { id: 42 })));
    }

    #[test]
    fn test_parse_list_defaults() {
        let Command::List(list) = parse(&["carbon", "list"]).command else {
            panic!("expected list command");
        };
        assert!(list.since.is_none());
        assert!(list.limit.is_none());
        assert_eq!(list.format, OutputFormat::Table);
    }

    #[test]
    fn test_parse_goal_set() {
        let cli = parse(&["carbon", "goal", "set", "150", "--month", "2024-06"]);
        let Command::Goal(GoalCommand::Set { target_kg, month }) = cli.command else {
            panic!("expected goal set");
        };
        assert_eq!(target_kg, 150.0);
        assert_eq!(month.as_deref(), Some("2024-06"));
    }

    #[test]
    fn test_parse_export_conflict() {
        assert!(Cli::try_parse_from(["carbon", "export", "--stdout", "-o", "x.csv"]).is_err());
    }

    #[test]
    fn test_parse_global_user() {
        let cli = parse(&["carbon", "dashboard", "--user", "alice"]);
        assert_eq!(cli.user.as_deref(), Some("alice"));
        assert!(matches!(cli.command, Command::Dashboard(_)));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["carbon", "-c", "/custom/config.toml", "status"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }
}
