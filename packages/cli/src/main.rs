#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for outbreak statistics and forecasts.
//!
//! Runs the same operations as the HTTP API against a local statistics
//! table. Without a subcommand, an interactive menu lets the user pick an
//! action.

mod interactive;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use outbreak_server::ServerConfig;
use outbreak_server_models::ApiDailyForecast;
use outbreak_stats::StateStatsSource;

#[derive(Parser)]
#[command(name = "outbreak", about = "Outbreak statistics and forecasting toolchain")]
struct Cli {
    /// Per-region statistics CSV (defaults to `STATE_STATS_PATH` or
    /// `data/statestats.csv`)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List known states in alphabetical order
    States,
    /// Show aggregated totals per state
    Stats {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Forecast confirmed, recovered and deaths for a state
    Predict {
        /// State name (case-insensitive)
        state: String,
        /// Print one row per day instead of one series per metric
        #[arg(long)]
        daily: bool,
    },
    /// Start the HTTP API server
    Serve,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let source = cli
        .data
        .map_or_else(StateStatsSource::from_env, StateStatsSource::new);
    log::debug!("Using statistics table {}", source.path().display());

    match cli.command {
        None => interactive::run(source).await?,
        Some(Commands::States) => {
            for state in outbreak_forecast::list_known_states(&source)? {
                println!("{state}");
            }
        }
        Some(Commands::Stats { json }) => {
            let aggregates = outbreak_stats::get_state_aggregates(&source)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&aggregates)?);
            } else {
                print!("{}", report::stats_table(&aggregates));
            }
        }
        Some(Commands::Predict { state, daily }) => {
            let result = outbreak_forecast::forecast_for_state(&source, &state)?;
            if daily {
                let view = ApiDailyForecast::new(&result, chrono::Utc::now());
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
        }
        Some(Commands::Serve) => {
            let config = ServerConfig {
                source,
                ..ServerConfig::from_env()
            };
            serve(config).await?;
        }
    }

    Ok(())
}

/// Runs the server on its own actix system so it does not nest inside the
/// tokio runtime.
async fn serve(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    tokio::task::spawn_blocking(move || {
        actix_web::rt::System::new().block_on(outbreak_server::serve(config))
    })
    .await??;

    Ok(())
}
