//! waitroom: find the emergency room to go to right now.
//!
//! Ranks a city's emergency departments by published wait and distance from
//! the patient, using the live wait-time feed or a saved snapshot of it.

use anyhow::Context;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use waitroom_core::config::Config;
use waitroom_core::{Error, exit_codes};
use waitroom_feed::{FeedConfig, HttpFeed, StaticFeed, WaitTimeFeed};
use waitroom_geo::Location;
use waitroom_telemetry::{TelemetryConfig, metrics};
use waitroom_triage::{
    QueryError, QueryOutput, QueryResult, UNKNOWN_WAIT_MINUTES, UrgencyLevel, WaitRoomQuery,
    WaitRoomQueryService, summary::format_distance, tool_declaration, try_parse_wait_time,
};

/// Emergency room wait-time ranking
#[derive(Parser)]
#[command(name = "waitroom")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a waitroom.toml configuration file
    #[arg(short, long, global = true, env = "WAITROOM_CONFIG")]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print collected metrics to stderr on exit
    #[arg(long, global = true)]
    show_metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank a city's emergency rooms for a patient location
    Query {
        /// City key in the feed, e.g. Edmonton
        #[arg(long)]
        city: String,

        /// Patient latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Patient longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// Triage urgency (low, medium, high, emergency)
        #[arg(short, long, default_value = "high")]
        urgency: UrgencyLevel,

        /// Only keep facilities within this many kilometers
        #[arg(short, long)]
        max_distance: Option<f64>,

        /// Read the feed from a JSON snapshot instead of the network
        #[arg(long)]
        feed_file: Option<PathBuf>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how a wait-time text is read
    ParseWait {
        /// Wait text as published, e.g. "2 hr 15 min"
        text: String,
    },

    /// Print the LLM tool declaration
    ToolSchema,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            report_error(&e, json_requested(&cli.command));
            return ExitCode::from(e.exit_code());
        }
    };

    let telemetry = TelemetryConfig {
        log_level: if cli.verbose {
            "debug".to_string()
        } else {
            config.schema.telemetry.log_level.clone()
        },
        json: config.schema.telemetry.json,
        ..TelemetryConfig::default()
    };
    if let Err(e) = waitroom_telemetry::init_with_config(telemetry) {
        eprintln!("{} {e}", "⚠".yellow());
    }

    let code = match run(cli.command, &config).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", "✗".red());
            exit_codes::FAILURE
        }
    };

    if cli.show_metrics {
        match serde_json::to_string_pretty(&metrics().export_json()) {
            Ok(json) => eprintln!("{json}"),
            Err(e) => eprintln!("{} {e}", "⚠".yellow()),
        }
    }

    ExitCode::from(code)
}

async fn run(command: Commands, config: &Config) -> anyhow::Result<u8> {
    match command {
        Commands::Query {
            city,
            lat,
            lng,
            urgency,
            max_distance,
            feed_file,
            json,
        } => {
            let location = Location::new(lat, lng);
            if !location.is_valid() {
                let err = Error::validation(format!("location {location} is out of range"))
                    .with_suggestion("Latitude must be within ±90 and longitude within ±180");
                report_error(&err, json);
                return Ok(err.exit_code());
            }

            let mut request = WaitRoomQuery::new(city, urgency);
            request.max_distance_km = max_distance;

            let outcome = match feed_file {
                Some(path) => {
                    let feed = StaticFeed::from_path(&path)
                        .with_context(|| format!("failed to load feed snapshot {}", path.display()))?;
                    run_query(feed, config, &request, location).await
                }
                None => {
                    let feed_config =
                        FeedConfig::from_section(&config.schema.feed).with_env_overrides();
                    let feed = HttpFeed::with_config(feed_config).context("invalid feed configuration")?;
                    run_query(feed, config, &request, location).await
                }
            };

            let (result, failure) = match outcome {
                Ok(output) => (QueryResult::from(output), None),
                Err(e) => (QueryResult::failure(), Some(e.into_core())),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result);
            }

            match failure {
                Some(err) => {
                    report_error(&err, json);
                    Ok(err.exit_code())
                }
                None => Ok(exit_codes::SUCCESS),
            }
        }

        Commands::ParseWait { text } => {
            match try_parse_wait_time(&text) {
                Some(minutes) => println!("{minutes} min"),
                None => println!(
                    "{} unrecognized, ranks as {UNKNOWN_WAIT_MINUTES} min",
                    text.yellow()
                ),
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::ToolSchema => {
            println!("{}", serde_json::to_string_pretty(&tool_declaration())?);
            Ok(exit_codes::SUCCESS)
        }
    }
}

async fn run_query<F: WaitTimeFeed>(
    feed: F,
    config: &Config,
    request: &WaitRoomQuery,
    location: Location,
) -> Result<QueryOutput, QueryError> {
    WaitRoomQueryService::from_config(feed, &config.schema.ranking)
        .try_query(request, location)
        .await
}

/// Print a coded error to stderr, as a JSON report when `json` is set
fn report_error(err: &Error, json: bool) {
    if json {
        match serde_json::to_string_pretty(&err.to_report()) {
            Ok(report) => eprintln!("{report}"),
            Err(e) => eprintln!("{} {e}", "⚠".yellow()),
        }
    } else {
        eprintln!("{} {err}", "✗".red());
    }
}

fn json_requested(command: &Commands) -> bool {
    matches!(command, Commands::Query { json: true, .. })
}

fn print_result(result: &QueryResult) {
    if !result.success {
        eprintln!("{} {}", "✗".red(), result.message);
        return;
    }

    println!("{} {}", "✓".green(), result.message);

    let Some(full) = &result.full_result else {
        return;
    };
    if full.facilities.is_empty() {
        return;
    }

    println!();
    println!("{}", "Ranked facilities".bold());
    println!("{}", "─".repeat(17));
    for (rank, facility) in full.facilities.iter().enumerate() {
        let wait = if facility.has_known_wait() {
            facility.wait_time().green().to_string()
        } else {
            facility.wait_time().dimmed().to_string()
        };
        println!(
            "{:>2}. {}  {}  {}",
            rank + 1,
            facility.name().bold(),
            wait,
            format_distance(facility.distance_km).cyan()
        );
        if !facility.record.address.is_empty() {
            println!("    {}", facility.record.address.dimmed());
        }
        if !facility.record.note.is_empty() {
            println!("    {}", facility.record.note.dimmed());
        }
    }
}
