#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Forecast result types for per-state outbreak predictions.

use outbreak_stats_models::Metric;
use serde::{Deserialize, Serialize};

/// Length of the synthesized history each model is fitted on.
pub const HISTORY_DAYS: usize = 30;

/// Number of future steps forecast per metric.
pub const FORECAST_STEPS: usize = 20;

/// `(p, d, q)` order of an ARIMA model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArimaOrder {
    /// Autoregressive terms.
    pub p: usize,
    /// Differencing passes.
    pub d: usize,
    /// Moving-average terms.
    pub q: usize,
}

impl ArimaOrder {
    /// Order used for every state forecast.
    pub const STATE_FORECAST: Self = Self::new(5, 1, 0);

    /// Creates an order.
    #[must_use]
    pub const fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }
}

impl std::fmt::Display for ArimaOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ARIMA({},{},{})", self.p, self.d, self.q)
    }
}

/// Forecast for one state: [`FORECAST_STEPS`] integer values per metric.
///
/// Serializes to exactly `{"confirmed", "recovered", "deaths"}`; the matched
/// state label is carried alongside but not serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// State label the request resolved to, as stored.
    #[serde(skip)]
    pub state: String,
    /// Forecast confirmed totals.
    pub confirmed: Vec<i64>,
    /// Forecast recovered totals.
    pub recovered: Vec<i64>,
    /// Forecast death totals.
    pub deaths: Vec<i64>,
}

impl ForecastResult {
    /// Returns the forecast series for `metric`.
    #[must_use]
    pub fn get(&self, metric: Metric) -> &[i64] {
        match metric {
            Metric::Confirmed => &self.confirmed,
            Metric::Recovered => &self.recovered,
            Metric::Deaths => &self.deaths,
        }
    }

    /// Returns the series for `metric` mutably.
    pub const fn get_mut(&mut self, metric: Metric) -> &mut Vec<i64> {
        match metric {
            Metric::Confirmed => &mut self.confirmed,
            Metric::Recovered => &mut self.recovered,
            Metric::Deaths => &mut self.deaths,
        }
    }

    /// Pivots the three series into one row per forecast day.
    ///
    /// Rows stop at the shortest series.
    #[must_use]
    pub fn days(&self) -> Vec<ForecastDay> {
        self.confirmed
            .iter()
            .zip(&self.recovered)
            .zip(&self.deaths)
            .enumerate()
            .map(|(i, ((&confirmed, &recovered), &deaths))| ForecastDay {
                day: u32::try_from(i + 1).unwrap_or(u32::MAX),
                confirmed,
                recovered,
                deaths,
                active: confirmed
                    .saturating_sub(recovered)
                    .saturating_sub(deaths),
            })
            .collect()
    }
}

/// One forecast day with active cases derived from the other metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    /// 1-based day offset from today.
    pub day: u32,
    /// Forecast confirmed total.
    pub confirmed: i64,
    /// Forecast recovered total.
    pub recovered: i64,
    /// Forecast death total.
    pub deaths: i64,
    /// `confirmed - recovered - deaths`. May be negative.
    pub active: i64,
}
