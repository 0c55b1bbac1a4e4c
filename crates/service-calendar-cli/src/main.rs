mod cli;
mod logging;

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use service_calendar::{Date, ExceptionType, ScanOptions, ServiceCalendar};

use cli::{Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let options = cli.scan_options();
    match &cli.command {
        Command::Compare { a, b } => compare(a, b, &options),
        Command::Info { calendar, on, json } => info(calendar, *on, *json, &options),
    }
}

fn load_calendar(path: &Path) -> Result<ServiceCalendar> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read calendar {}", path.display()))?;
    let calendar: ServiceCalendar = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse calendar {}", path.display()))?;
    tracing::info!(
        id = %calendar.id,
        exceptions = calendar.exceptions.len(),
        "loaded calendar from {}",
        path.display()
    );
    Ok(calendar)
}

fn compare(a: &Path, b: &Path, options: &ScanOptions) -> Result<ExitCode> {
    let cal_a = load_calendar(a)?;
    let cal_b = load_calendar(b)?;

    let equivalent = cal_a
        .is_equivalent_with_options(&cal_b, options)
        .context("comparison aborted")?;

    if equivalent {
        println!("equivalent");
        return Ok(ExitCode::SUCCESS);
    }

    println!("different");
    if let Some(date) = cal_a.first_disagreement(&cal_b) {
        println!("first difference: {date}");
    }
    Ok(ExitCode::from(1))
}

/// Report printed by `info`.
#[derive(Debug, Serialize)]
struct InfoReport {
    id: String,
    empty: bool,
    first_defined: Option<Date>,
    last_defined: Option<Date>,
    first_active: Option<Date>,
    last_active: Option<Date>,
    active_days: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    on: Option<DayReport>,
}

#[derive(Debug, Serialize)]
struct DayReport {
    date: Date,
    active: bool,
    exception: Option<ExceptionType>,
}

fn info(path: &Path, on: Option<Date>, json: bool, options: &ScanOptions) -> Result<ExitCode> {
    let calendar = load_calendar(path)?;

    let active = calendar
        .active_dates_with_options(options)
        .context("scan aborted")?;

    let report = InfoReport {
        id: calendar.id.clone(),
        empty: calendar.is_empty(),
        first_defined: calendar.first_defined_date(),
        last_defined: calendar.last_defined_date(),
        first_active: active.first().copied(),
        last_active: active.last().copied(),
        active_days: active.len(),
        on: on.map(|date| DayReport {
            date,
            active: calendar.is_active_on(date),
            exception: calendar.exception_type_on(date),
        }),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_report(report: &InfoReport) {
    let show = |date: Option<Date>| date.map_or_else(|| "none".to_string(), |d| d.to_string());

    println!("id: {}", report.id);
    println!("empty: {}", report.empty);
    println!(
        "defined: {} .. {}",
        show(report.first_defined),
        show(report.last_defined)
    );
    println!("first active: {}", show(report.first_active));
    println!("last active: {}", show(report.last_active));
    println!("active days: {}", report.active_days);

    if let Some(day) = &report.on {
        let exception = match day.exception {
            Some(ExceptionType::Added) => " (added by exception)",
            Some(ExceptionType::Removed) => " (removed by exception)",
            None => "",
        };
        let state = if day.active { "active" } else { "inactive" };
        println!("{}: {state}{exception}", day.date);
    }
}
