//! `venue-avail` CLI — check venue availability against recurring weekly
//! schedule blocks from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Check one venue (schedules from a file)
//! venue-avail check --venue 12 --start 2026-03-16T09:00:00 --end 2026-03-16T11:00:00 \
//!     -i schedules.json
//!
//! # Check several venues of one reservation, schedules piped on stdin
//! curl -s "$API/schedules" | venue-avail check --venue 12 --venue 14 \
//!     --start 2026-03-16T09:00 --end 2026-03-16T11:00
//!
//! # List every colliding block instead of the first one
//! venue-avail check --venue 12 --all --start ... --end ... -i schedules.json
//!
//! # Report malformed schedule records
//! venue-avail validate -i schedules.json
//!
//! # Show the weekdays a window spans
//! venue-avail weekdays --start 2026-03-20T23:00 --end 2026-03-21T01:00
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=debug` to see evaluation decisions.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::{self, Read};
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use venue_availability::schedule::weekday_name;
use venue_availability::{
    check_venues, find_conflicts, parse_schedule_json, validate_records, EvaluatorConfig,
    ReservationWindow, VenueId,
};

/// Exit status of `check --fail-on-conflict` when any venue is taken.
const EXIT_CONFLICT: i32 = 2;

#[derive(Parser)]
#[command(
    name = "venue-avail",
    version,
    about = "Check venue availability against recurring weekly schedule blocks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML evaluator configuration file
    #[arg(long, global = true, env = "VENUE_AVAILABILITY_CONFIG")]
    config: Option<String>,

    /// IANA timezone for reading reservation times (overrides the config file)
    #[arg(long, global = true)]
    timezone: Option<String>,

    /// Fail instead of assuming availability when a venue has no schedule blocks
    #[arg(long, global = true)]
    strict_no_data: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether venues are free for a reservation window
    Check {
        /// Venue id to check (repeat for several venues)
        #[arg(long = "venue", required = true)]
        venues: Vec<String>,
        /// Reservation start (ISO 8601; no offset means configured timezone)
        #[arg(long)]
        start: String,
        /// Reservation end (ISO 8601; no offset means configured timezone)
        #[arg(long)]
        end: String,
        /// Schedule JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Report every colliding block, not just the first
        #[arg(long)]
        all: bool,
        /// Exit with status 2 when any venue has a conflict
        #[arg(long)]
        fail_on_conflict: bool,
    },
    /// Report malformed schedule records
    Validate {
        /// Schedule JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print the weekdays a reservation window spans
    Weekdays {
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = load_config(
        cli.config.as_deref(),
        cli.timezone.as_deref(),
        cli.strict_no_data,
    )?;

    match cli.command {
        Commands::Check {
            venues,
            start,
            end,
            input,
            all,
            fail_on_conflict,
        } => {
            let window = ReservationWindow::parse(&start, &end, config.timezone)
                .context("Invalid reservation window")?;
            let records = parse_schedule_json(&read_input(input.as_deref())?)
                .context("Failed to parse schedule JSON")?;
            let venue_ids: Vec<VenueId> = venues.into_iter().map(VenueId::from).collect();
            debug!(records = records.len(), venues = venue_ids.len(), "checking availability");

            let (output, any_conflict) = if all {
                let mut any_conflict = false;
                let mut report = Vec::with_capacity(venue_ids.len());
                for venue_id in &venue_ids {
                    let conflicts = find_conflicts(venue_id, &window, &records, &config)
                        .with_context(|| format!("Failed to check venue {}", venue_id))?;
                    any_conflict |= !conflicts.is_empty();
                    report.push(json!({ "venue_id": venue_id, "conflicts": conflicts }));
                }
                (serde_json::Value::Array(report), any_conflict)
            } else {
                let results = check_venues(&venue_ids, &window, &records, &config)
                    .context("Failed to check availability")?;
                let any_conflict = results.iter().any(|r| !r.result.is_available());
                let output = match results.as_slice() {
                    [single] => serde_json::to_value(&single.result)?,
                    _ => serde_json::to_value(&results)?,
                };
                (output, any_conflict)
            };

            println!("{}", serde_json::to_string_pretty(&output)?);

            if fail_on_conflict && any_conflict {
                process::exit(EXIT_CONFLICT);
            }
        }
        Commands::Validate { input } => {
            let records = parse_schedule_json(&read_input(input.as_deref())?)
                .context("Failed to parse schedule JSON")?;
            let issues = validate_records(&records);
            if issues.is_empty() {
                println!("{} schedule records OK", records.len());
            } else {
                println!("{}", serde_json::to_string_pretty(&issues)?);
                process::exit(1);
            }
        }
        Commands::Weekdays { start, end } => {
            let window = ReservationWindow::parse(&start, &end, config.timezone)
                .context("Invalid reservation window")?;
            for day in window.spanned_weekdays(config.timezone) {
                println!("{}", weekday_name(day));
            }
        }
    }

    Ok(())
}

/// Structured logging to stderr, filtered by `RUST_LOG` (default: warn).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Build the evaluator configuration from the optional config file, then apply
/// command-line overrides.
fn load_config(
    path: Option<&str>,
    timezone: Option<&str>,
    strict_no_data: bool,
) -> Result<EvaluatorConfig> {
    let mut config = match path {
        Some(path) => EvaluatorConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path))?,
        None => EvaluatorConfig::default(),
    };

    if let Some(tz) = timezone {
        config = config.with_timezone(tz)?;
    }
    if strict_no_data {
        config = config.with_assume_available_when_no_data(false);
    }

    info!(
        timezone = config.timezone.name(),
        assume_available_when_no_data = config.assume_available_when_no_data,
        "config_loaded"
    );
    Ok(config)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
