#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for outbreak statistics and forecasts.
//!
//! Serves the aggregated per-state table, the list of forecastable states
//! and per-state ARIMA forecasts under `/api`. The statistics table is
//! re-read on every request; handlers push that blocking work onto the
//! actix blocking pool.

mod handlers;
pub mod interactive;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use outbreak_stats::StateStatsSource;

/// Default bind address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";

/// Default port.
pub const DEFAULT_PORT: u16 = 8080;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Location of the per-region statistics table.
    pub source: StateStatsSource,
}

/// Server settings, normally read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind (`BIND_ADDR`).
    pub bind_addr: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// Statistics table location (`STATE_STATS_PATH`).
    pub source: StateStatsSource,
}

impl ServerConfig {
    /// Reads `BIND_ADDR`, `PORT` and `STATE_STATS_PATH`, falling back to
    /// defaults for anything unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            bind_addr,
            port,
            source: StateStatsSource::from_env(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            source: StateStatsSource::default(),
        }
    }
}

/// Registers every `/api` route.
///
/// `/predict/states` is registered before `/predict/{state}` so the literal
/// path wins.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/stats/states", web::get().to(handlers::state_stats))
            .route("/predict/states", web::get().to(handlers::predict_states))
            .route("/predict/{state}", web::get().to(handlers::predict_state))
            .route(
                "/predict/{state}/daily",
                web::get().to(handlers::predict_state_daily),
            ),
    );
}

/// Starts the server using settings from the environment.
///
/// This is a regular async function; the caller provides the runtime (e.g.
/// via `#[actix_web::main]`) and initializes logging.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    serve(ServerConfig::from_env()).await
}

/// Starts the server with explicit settings.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let ServerConfig {
        bind_addr,
        port,
        source,
    } = config;

    if source.path().exists() {
        log::info!("Serving statistics from {}", source.path().display());
    } else {
        log::warn!(
            "Statistics table {} does not exist yet; requests will fail until it is created",
            source.path().display()
        );
    }

    let state = web::Data::new(AppState { source });

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.source, StateStatsSource::default());
    }
}
