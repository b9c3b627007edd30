//! HTTP handler functions for the outbreak API.

use actix_web::{HttpResponse, error::BlockingError, web};
use outbreak_forecast::ForecastError;
use outbreak_server_models::{ApiDailyForecast, ApiError, ApiForecast, ApiHealth, ApiStateStats};
use outbreak_stats::StatsError;

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/stats/states`
///
/// Returns the aggregated totals for every state.
pub async fn state_stats(state: web::Data<AppState>) -> HttpResponse {
    let source = state.source.clone();

    match web::block(move || outbreak_stats::get_state_aggregates(&source)).await {
        Ok(Ok(aggregates)) => {
            let stats: Vec<ApiStateStats> =
                aggregates.into_iter().map(ApiStateStats::from).collect();
            HttpResponse::Ok().json(stats)
        }
        Ok(Err(e)) => stats_error(&e),
        Err(e) => blocking_error(&e),
    }
}

/// `GET /api/predict/states`
///
/// Returns the sorted names of every forecastable state.
pub async fn predict_states(state: web::Data<AppState>) -> HttpResponse {
    let source = state.source.clone();

    match web::block(move || outbreak_forecast::list_known_states(&source)).await {
        Ok(Ok(states)) => HttpResponse::Ok().json(states),
        Ok(Err(e)) => forecast_error(&e),
        Err(e) => blocking_error(&e),
    }
}

/// `GET /api/predict/{state}`
///
/// Returns 20-day forecasts for confirmed, recovered and deaths.
pub async fn predict_state(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let source = state.source.clone();
    let name = path.into_inner();

    match web::block(move || outbreak_forecast::forecast_for_state(&source, &name)).await {
        Ok(Ok(result)) => HttpResponse::Ok().json(ApiForecast::from(result)),
        Ok(Err(e)) => forecast_error(&e),
        Err(e) => blocking_error(&e),
    }
}

/// `GET /api/predict/{state}/daily`
///
/// Returns the same forecast pivoted into one row per day, with active
/// cases derived from the other metrics.
pub async fn predict_state_daily(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let source = state.source.clone();
    let name = path.into_inner();

    match web::block(move || outbreak_forecast::forecast_for_state(&source, &name)).await {
        Ok(Ok(result)) => {
            HttpResponse::Ok().json(ApiDailyForecast::new(&result, chrono::Utc::now()))
        }
        Ok(Err(e)) => forecast_error(&e),
        Err(e) => blocking_error(&e),
    }
}

fn stats_error(e: &StatsError) -> HttpResponse {
    log::error!("Failed to aggregate state statistics: {e}");
    HttpResponse::InternalServerError().json(ApiError::new(e.to_string()))
}

fn forecast_error(e: &ForecastError) -> HttpResponse {
    match e {
        ForecastError::StateNotFound { state } => {
            log::debug!("Forecast requested for unknown state '{state}'");
            HttpResponse::NotFound().json(ApiError::new(e.to_string()))
        }
        ForecastError::ModelFit { .. } => {
            log::error!("Forecast failed: {e}");
            HttpResponse::InternalServerError().json(ApiError::new(e.to_string()))
        }
        ForecastError::Stats(inner) => stats_error(inner),
    }
}

fn blocking_error(e: &BlockingError) -> HttpResponse {
    log::error!("Blocking task failed: {e}");
    HttpResponse::InternalServerError().json(ApiError::new("Internal server error"))
}
