//! `carbon` - CLI for carbontrack
//!
//! Logs activities, shows the footprint dashboard, manages monthly goals and
//! exports CSV.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::fs::File;
use std::io::{self, BufWriter};
use std::process::ExitCode;

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::Parser;

use carbontrack::aggregate::monthly_totals;
use carbontrack::chart::render_bar_chart;
use carbontrack::cli::{
    AddCommand, Cli, Command, ConfigCommand, DashboardCommand, ExportCommand, GoalCommand,
    ListCommand, OutputFormat,
};
use carbontrack::export::{write_csv, DEFAULT_EXPORT_FILE};
use carbontrack::goal::{first_of_month, parse_month};
use carbontrack::{init_logging, ActivityRecord, Config, Dashboard, Error, NewActivity, Storage};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_status(&err))
        }
    }
}

/// Exit status for a failed command: 2 for rejected input, 3 for a missing
/// record, 1 otherwise.
fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<Error>() {
        Some(e) if e.is_input_error() => 2,
        Some(e) if e.is_not_found() => 3,
        _ => 1,
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    let owner = config.owner(cli.user.as_deref());
    let today = Local::now().date_naive();

    match cli.command {
        Command::Config(cmd) => handle_config(&config, cmd),
        Command::Add(cmd) => handle_add(&open_storage(&config)?, &owner, today, &cmd),
        Command::Delete(cmd) => handle_delete(&open_storage(&config)?, &owner, cmd.id),
        Command::List(cmd) => handle_list(&open_storage(&config)?, &owner, &cmd),
        Command::Dashboard(cmd) => {
            handle_dashboard(&open_storage(&config)?, &config, &owner, today, &cmd)
        }
        Command::Goal(cmd) => handle_goal(&open_storage(&config)?, &owner, today, cmd),
        Command::Export(cmd) => handle_export(&open_storage(&config)?, &owner, &cmd),
        Command::Status(cmd) => handle_status(&open_storage(&config)?, &owner, cmd.json),
    }
}

fn open_storage(config: &Config) -> anyhow::Result<Storage> {
    let db_path = config.database_path();
    Storage::open(&db_path).with_context(|| format!("opening database {}", db_path.display()))
}

fn handle_add(
    storage: &Storage,
    owner: &str,
    today: NaiveDate,
    cmd: &AddCommand,
) -> anyhow::Result<()> {
    let activity = NewActivity::new(cmd.date.unwrap_or(today), cmd.category.into(), cmd.value)?;
    let record = storage.insert_activity(owner, &activity)?;
    println!(
        "Logged #{} {} {} {} on {} -> {:.2} kg CO2e",
        record.id().unwrap_or_default(),
        record.category().label(),
        record.raw_value(),
        record.category().unit(),
        record.date(),
        record.co2_equivalent()
    );
    Ok(())
}

fn handle_delete(storage: &Storage, owner: &str, id: i64) -> anyhow::Result<()> {
    if !storage.delete_activity(owner, id)? {
        return Err(Error::ActivityNotFound { id }.into());
    }
    println!("Deleted activity #{id}");
    Ok(())
}

fn handle_list(storage: &Storage, owner: &str, cmd: &ListCommand) -> anyhow::Result<()> {
    let records = match cmd.limit {
        Some(limit) => {
            let mut recent = storage.recent_activities(owner, limit)?;
            if let Some(since) = cmd.since {
                recent.retain(|r| r.date() >= since);
            }
            recent
        }
        None => storage.list_activities(owner, cmd.since)?,
    };

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Plain => {
            for record in &records {
                println!("{}", plain_line(record));
            }
        }
        OutputFormat::Table => print_table(&records),
    }
    Ok(())
}

fn plain_line(record: &ActivityRecord) -> String {
    format!(
        "#{} {} {} {} {} -> {:.2} kg",
        record.id().unwrap_or_default(),
        record.date(),
        record.category().label(),
        record.raw_value(),
        record.category().unit(),
        record.co2_equivalent()
    )
}

fn print_table(records: &[ActivityRecord]) {
    if records.is_empty() {
        println!("No activities logged.");
        return;
    }
    println!(
        "{:>6}  {:<10}  {:<11}  {:>12}  {:>12}",
        "ID", "Date", "Category", "Value", "CO2e (kg)"
    );
    for record in records {
        let value = format!("{} {}", record.raw_value(), record.category().unit());
        println!(
            "{:>6}  {:<10}  {:<11}  {:>12}  {:>12.2}",
            record.id().unwrap_or_default(),
            record.date(),
            record.category().label(),
            value,
            record.co2_equivalent()
        );
    }
}

fn handle_dashboard(
    storage: &Storage,
    config: &Config,
    owner: &str,
    today: NaiveDate,
    cmd: &DashboardCommand,
) -> anyhow::Result<()> {
    let dashboard = Dashboard::build(storage, owner, today, config.dashboard.recent_limit)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    let title = format!("Carbon footprint for {} (as of {})", dashboard.owner, today);
    println!("{title}");
    println!("{}", "=".repeat(title.len()));
    println!("Total footprint:   {:.2} kg CO2e", dashboard.total_kg());
    println!(
        "This month:        {:.2} kg CO2e",
        dashboard.current_month.total
    );
    match &dashboard.goal {
        Some(progress) if progress.goal.is_set() => {
            let status = if progress.exceeded {
                "EXCEEDED".to_string()
            } else {
                format!("{:.2} kg remaining", progress.remaining_kg)
            };
            println!(
                "Monthly goal:      {:.2} kg ({:.0}% used, {status})",
                progress.goal.target_kg,
                progress.percent_used().unwrap_or_default()
            );
        }
        _ => println!("Monthly goal:      not set (carbon goal set <KG>)"),
    }

    if !dashboard.all_time.is_empty() {
        println!();
        println!("By category:");
        for (label, value) in dashboard.all_time.labelled() {
            println!("  {label:<12} {value:>10.2} kg");
        }
    }

    if config.dashboard.show_chart && !cmd.no_chart {
        if let Some(chart) = render_bar_chart(&dashboard.all_time, config.dashboard.chart_width) {
            println!();
            print!("{chart}");
        }
    }

    if !dashboard.monthly.is_empty() {
        println!();
        println!("By month:");
        for month in &dashboard.monthly {
            println!(
                "  {}  {:>10.2} kg",
                month.month.format("%Y-%m"),
                month.total_kg
            );
        }
    }

    if !dashboard.recent.is_empty() {
        println!();
        println!("Recent activity:");
        for record in &dashboard.recent {
            println!("  {}", plain_line(record));
        }
    }

    println!();
    println!("Tips:");
    for tip in &dashboard.tips {
        println!("  - {tip}");
    }
    Ok(())
}

fn handle_goal(
    storage: &Storage,
    owner: &str,
    today: NaiveDate,
    cmd: GoalCommand,
) -> anyhow::Result<()> {
    let resolve = |month: Option<String>| -> carbontrack::Result<NaiveDate> {
        month.map_or(Ok(first_of_month(today)), |m| parse_month(&m))
    };

    match cmd {
        GoalCommand::Set { target_kg, month } => {
            let goal = storage.set_goal(owner, resolve(month)?, target_kg)?;
            println!(
                "Goal for {} set to {:.2} kg CO2e",
                goal.month.format("%Y-%m"),
                goal.target_kg
            );
        }
        GoalCommand::Show { month, json } => {
            let goal = storage.ensure_goal(owner, resolve(month)?)?;
            let records = storage.list_activities(owner, Some(goal.month))?;
            let actual = monthly_totals(&records)
                .get(&goal.month)
                .copied()
                .unwrap_or(0.0);
            let progress = goal.progress(actual);

            if json {
                println!("{}", serde_json::to_string_pretty(&progress)?);
            } else {
                println!("Goal for {}", goal.month.format("%Y-%m"));
                if goal.is_set() {
                    println!("  Target:    {:.2} kg CO2e", goal.target_kg);
                } else {
                    println!("  Target:    not set");
                }
                println!("  Actual:    {actual:.2} kg CO2e");
                if goal.is_set() {
                    println!("  Remaining: {:.2} kg CO2e", progress.remaining_kg);
                    if progress.exceeded {
                        println!("  Goal exceeded.");
                    }
                }
            }
        }
    }
    Ok(())
}

fn handle_export(storage: &Storage, owner: &str, cmd: &ExportCommand) -> anyhow::Result<()> {
    let records = storage.list_activities(owner, None)?;

    if cmd.stdout {
        write_csv(io::stdout().lock(), &records)?;
        return Ok(());
    }

    let path = cmd
        .output
        .clone()
        .unwrap_or_else(|| DEFAULT_EXPORT_FILE.into());
    let file =
        File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let rows = write_csv(BufWriter::new(file), &records)?;
    println!("Exported {rows} activities to {}", path.display());
    Ok(())
}

fn handle_status(storage: &Storage, owner: &str, json: bool) -> anyhow::Result<()> {
    let stats = storage.stats()?;
    let owned = storage.count_activities(owner)?;

    if json {
        let status = serde_json::json!({
            "database_path": storage.path(),
            "owner": owner,
            "owner_activities": owned,
            "total_activities": stats.total_activities,
            "owners": stats.owners,
            "goals": stats.total_goals,
            "oldest_activity": stats.oldest_activity,
            "newest_activity": stats.newest_activity,
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("carbon status");
        println!("-------------");
        println!("Database:      {}", storage.path().display());
        println!("Owner:         {owner} ({owned} activities)");
        println!("All owners:    {}", stats.owners);
        println!("Activities:    {}", stats.total_activities);
        println!("Goals:         {}", stats.total_goals);
        if let (Some(oldest), Some(newest)) = (stats.oldest_activity, stats.newest_activity) {
            println!("Date range:    {oldest} .. {newest}");
        }
        println!("Size:          {} bytes", stats.db_size_bytes);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:   {}", config.database_path().display());
                println!();
                println!("[User]");
                println!("  Owner:           {}", config.owner(None));
                println!();
                println!("[Dashboard]");
                println!("  Recent limit:    {}", config.dashboard.recent_limit);
                println!("  Chart width:     {}", config.dashboard.chart_width);
                println!("  Show chart:      {}", config.dashboard.show_chart);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            if !path.exists() {
                bail!("configuration file not found: {}", path.display());
            }
            if let Err(e) = Config::load_from(Some(path)) {
                bail!("configuration error: {e}");
            }
            println!("Configuration is valid.");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status_for_input_error() {
        let err = anyhow::Error::from(Error::UnknownCategory("plastic".to_string()));
        assert_eq!(exit_status(&err), 2);
    }

    #[test]
    fn test_exit_status_for_missing_activity() {
        let err = anyhow::Error::from(Error::ActivityNotFound { id: 9 });
        assert_eq!(exit_status(&err), 3);
    }

    #[test]
    fn test_exit_status_sees_through_context() {
        let err = anyhow::Error::from(Error::ActivityNotFound { id: 9 }).context("deleting");
        assert_eq!(exit_status(&err), 3);
    }

    #[test]
    fn test_exit_status_for_other_errors() {
        let err = anyhow::Error::from(Error::internal("boom"));
        assert_eq!(exit_status(&err), 1);
        assert_eq!(exit_status(&anyhow::anyhow!("plain")), 1);
    }
}
