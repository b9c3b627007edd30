#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the outbreak server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the aggregation and forecast types to allow independent evolution of
//! the API contract.

use chrono::{DateTime, Utc};
use outbreak_forecast_models::{ForecastDay, ForecastResult};
use outbreak_stats_models::StateAggregate;
use serde::{Deserialize, Serialize};

/// Aggregated totals for one state as returned by the API.
///
/// Keys are capitalized to match what the dashboard table reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiStateStats {
    /// State label.
    pub state: String,
    /// Total confirmed infections.
    pub confirmed: u64,
    /// Recoveries.
    pub recovered: u64,
    /// Deaths.
    pub deaths: u64,
    /// Active cases.
    pub active: u64,
}

impl From<StateAggregate> for ApiStateStats {
    fn from(agg: StateAggregate) -> Self {
        Self {
            state: agg.state,
            confirmed: agg.confirmed,
            recovered: agg.recovered,
            deaths: agg.deaths,
            active: agg.active,
        }
    }
}

/// Per-metric forecast series for one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiForecast {
    /// Forecast confirmed totals.
    pub confirmed: Vec<i64>,
    /// Forecast recovered totals.
    pub recovered: Vec<i64>,
    /// Forecast death totals.
    pub deaths: Vec<i64>,
}

impl From<ForecastResult> for ApiForecast {
    fn from(result: ForecastResult) -> Self {
        Self {
            confirmed: result.confirmed,
            recovered: result.recovered,
            deaths: result.deaths,
        }
    }
}

/// Day-by-day forecast for one state, ready for charting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDailyForecast {
    /// State label the request resolved to.
    pub state: String,
    /// When the forecast was computed.
    pub generated_at: DateTime<Utc>,
    /// One row per forecast day.
    pub days: Vec<ForecastDay>,
}

impl ApiDailyForecast {
    /// Builds the daily view of `result`, stamped with `generated_at`.
    #[must_use]
    pub fn new(result: &ForecastResult, generated_at: DateTime<Utc>) -> Self {
        Self {
            state: result.state.clone(),
            generated_at,
            days: result.days(),
        }
    }
}

/// Error payload returned with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable description.
    pub error: String,
}

impl ApiError {
    /// Creates an error payload.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_stats_keys() {
        let stats = ApiStateStats::from(StateAggregate {
            state: "NY".to_string(),
            confirmed: 15,
            recovered: 11,
            deaths: 1,
            active: 3,
        });

        assert_eq!(
            serde_json::to_value(stats).unwrap(),
            serde_json::json!({
                "State": "NY",
                "Confirmed": 15,
                "Recovered": 11,
                "Deaths": 1,
                "Active": 3,
            })
        );
    }

    #[test]
    fn daily_forecast_shape() {
        let result = ForecastResult {
            state: "NY".to_string(),
            confirmed: vec![10],
            recovered: vec![4],
            deaths: vec![1],
        };
        let generated_at = DateTime::from_timestamp(0, 0).unwrap();
        let json = serde_json::to_value(ApiDailyForecast::new(&result, generated_at)).unwrap();

        assert_eq!(json["state"], "NY");
        assert_eq!(json["generatedAt"], "1970-01-01T00:00:00Z");
        assert_eq!(
            json["days"],
            serde_json::json!([{
                "day": 1,
                "confirmed": 10,
                "recovered": 4,
                "deaths": 1,
                "active": 5,
            }])
        );
    }

    #[test]
    fn error_payload() {
        assert_eq!(
            serde_json::to_value(ApiError::new("State not found in the dataset")).unwrap(),
            serde_json::json!({ "error": "State not found in the dataset" })
        );
    }
}
