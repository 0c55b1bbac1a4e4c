use std::path::PathBuf;

use clap::{Parser, Subcommand};
use service_calendar::{Date, ScanOptions};

/// Inspect and compare transit service calendars.
#[derive(Parser)]
#[command(name = "service-calendar", version, about = "Inspect and compare transit service calendars")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Refuse to scan windows wider than this many days.
    #[arg(long, global = true, value_name = "DAYS")]
    pub max_scan_days: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            max_scan_days: self.max_scan_days,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Decide whether two calendars run on exactly the same dates.
    ///
    /// Exits 0 if equivalent, 1 if different.
    Compare {
        /// First calendar (JSON).
        a: PathBuf,
        /// Second calendar (JSON).
        b: PathBuf,
    },
    /// Show the defined window and active dates of a calendar.
    Info {
        /// Calendar (JSON).
        calendar: PathBuf,

        /// Also report activity on this date (YYYYMMDD).
        #[arg(long, value_name = "YYYYMMDD")]
        on: Option<Date>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}
