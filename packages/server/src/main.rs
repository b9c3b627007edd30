#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server binary for outbreak statistics and forecasts.
//!
//! Configuration comes from `BIND_ADDR`, `PORT` and `STATE_STATS_PATH`;
//! log output is controlled with `RUST_LOG`.

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    outbreak_server::run_server().await
}
