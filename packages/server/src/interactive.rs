//! Interactive mode for the server.
//!
//! Prompts for bind address, port and statistics table location before
//! starting the server.

use dialoguer::{Confirm, Input};
use outbreak_stats::StateStatsSource;

use crate::ServerConfig;

/// Runs the server in interactive mode, prompting for configuration.
///
/// Defaults for each prompt come from [`ServerConfig::from_env`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run() -> std::io::Result<()> {
    println!("Outbreak Server");
    println!();

    let defaults = ServerConfig::from_env();

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(defaults.bind_addr.clone())
        .interact_text()
        .unwrap_or_else(|_| defaults.bind_addr.clone());

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()
        .unwrap_or(defaults.port);

    let default_path = defaults.source.path().display().to_string();
    let data_path: String = Input::new()
        .with_prompt("Statistics table")
        .default(default_path.clone())
        .interact_text()
        .unwrap_or(default_path);

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::serve(ServerConfig {
        bind_addr,
        port,
        source: StateStatsSource::new(data_path),
    })
    .await
}
