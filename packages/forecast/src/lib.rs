#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Short-horizon forecasts of per-state outbreak totals.
//!
//! For a requested state, the current confirmed, recovered and death totals
//! are each expanded into a synthetic 30-day history, an ARIMA(5,1,0) model
//! is fitted per metric, and the next 20 days are forecast. Every call
//! re-reads the statistics table through [`outbreak_stats`].

pub mod arima;
pub mod history;

use outbreak_forecast_models::{ArimaOrder, FORECAST_STEPS, ForecastResult};
use outbreak_stats::{StateStatsSource, StatsError};
use outbreak_stats_models::{Metric, StateAggregate};
use thiserror::Error;

pub use arima::{Arima, FittedArima, ModelError};
pub use history::synthetic_history;

/// Errors that can occur while listing or forecasting states.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// No aggregate matches the requested state.
    #[error("State not found in the dataset")]
    StateNotFound {
        /// State name as requested.
        state: String,
    },

    /// Fitting or forecasting one metric's model failed.
    #[error("An error occurred during prediction: {metric} model failed: {source}")]
    ModelFit {
        /// Metric whose model failed.
        metric: Metric,
        /// Underlying model error.
        source: ModelError,
    },

    /// The statistics table could not be read.
    #[error(transparent)]
    Stats(#[from] StatsError),
}

/// Returns every known state label, sorted ascending and deduplicated.
///
/// # Errors
///
/// Returns [`ForecastError::Stats`] if the statistics table cannot be read.
pub fn list_known_states(source: &StateStatsSource) -> Result<Vec<String>, ForecastError> {
    let mut states: Vec<String> = outbreak_stats::get_state_aggregates(source)?
        .into_iter()
        .map(|agg| agg.state)
        .collect();

    states.sort_unstable();
    states.dedup();

    Ok(states)
}

/// Forecasts confirmed, recovered and death totals for `state_name`.
///
/// The name is matched case-insensitively against the aggregated labels;
/// when several labels match, the first in aggregation order is used.
///
/// # Errors
///
/// * [`ForecastError::Stats`] if the statistics table cannot be read
/// * [`ForecastError::StateNotFound`] if no label matches
/// * [`ForecastError::ModelFit`] if any metric's model fails
pub fn forecast_for_state(
    source: &StateStatsSource,
    state_name: &str,
) -> Result<ForecastResult, ForecastError> {
    let wanted = state_name.to_lowercase();

    let current = outbreak_stats::get_state_aggregates(source)?
        .into_iter()
        .find(|agg| agg.state.to_lowercase() == wanted)
        .ok_or_else(|| {
            log::debug!("No aggregate matches state '{state_name}'");
            ForecastError::StateNotFound {
                state: state_name.to_owned(),
            }
        })?;

    forecast_aggregate(&current)
}

/// Forecasts every metric of an already-resolved aggregate.
///
/// Fails as a whole if any single metric fails.
///
/// # Errors
///
/// Returns [`ForecastError::ModelFit`] if a model cannot be fitted or its
/// forecast diverges.
pub fn forecast_aggregate(current: &StateAggregate) -> Result<ForecastResult, ForecastError> {
    let model = Arima::new(ArimaOrder::STATE_FORECAST);

    forecast_with(current, |history| model.fit(history)?.forecast(FORECAST_STEPS))
}

/// Runs `fit` over each metric's synthetic history in [`Metric::ALL`] order,
/// stopping at the first failure.
fn forecast_with(
    current: &StateAggregate,
    mut fit: impl FnMut(&[f64]) -> Result<Vec<f64>, ModelError>,
) -> Result<ForecastResult, ForecastError> {
    let mut result = ForecastResult {
        state: current.state.clone(),
        confirmed: Vec::new(),
        recovered: Vec::new(),
        deaths: Vec::new(),
    };

    for metric in Metric::ALL {
        let history = synthetic_history(current.value(metric), metric.decay_rate());

        let forecast = fit(&history).map_err(|source| {
            log::warn!(
                "{} fit failed for {metric} in '{}': {source}",
                ArimaOrder::STATE_FORECAST,
                current.state
            );
            ForecastError::ModelFit { metric, source }
        })?;

        *result.get_mut(metric) = forecast.into_iter().map(round_count).collect();
    }

    log::info!(
        "Forecast {FORECAST_STEPS} days for '{}' from confirmed={} recovered={} deaths={}",
        current.state,
        current.confirmed,
        current.recovered,
        current.deaths
    );

    Ok(result)
}

/// Rounds half to even, then narrows to an integer count.
#[allow(clippy::cast_possible_truncation)]
fn round_count(value: f64) -> i64 {
    value.round_ties_even() as i64
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    const TABLE: &str = "\
region,totalInfected,activeCases,recovered,death
NY,600,100,450,50
CA,300,50,240,10
NY,400,50,300,25
Quiet,0,0,0,0
";

    fn write_csv(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("forecast-{}.csv", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn lists_states_sorted_and_deduplicated() {
        let path = write_csv(
            "region,totalInfected,activeCases,recovered,death\nb,1,0,0,0\nA,1,0,0,0\na,1,0,0,0\nB,1,0,0,0\nA,2,0,0,0\n",
        );
        let states = list_known_states(&StateStatsSource::new(&path)).unwrap();

        assert_eq!(states, ["A", "B", "a", "b"]);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn blank_labels_are_not_states() {
        let path = write_csv(
            "region,totalInfected,activeCases,recovered,death\nKerala,10,1,8,1\n,5,1,4,0\nGoa\n",
        );
        let source = StateStatsSource::new(&path);

        assert_eq!(list_known_states(&source).unwrap(), ["Goa", "Kerala"]);
        assert!(matches!(
            forecast_for_state(&source, "").unwrap_err(),
            ForecastError::StateNotFound { .. }
        ));

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn forecast_has_twenty_values_per_metric() {
        let path = write_csv(TABLE);
        let result = forecast_for_state(&StateStatsSource::new(&path), "NY").unwrap();

        assert_eq!(result.state, "NY");
        for metric in Metric::ALL {
            assert_eq!(result.get(metric).len(), FORECAST_STEPS, "{metric}");
        }

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn forecast_continues_confirmed_trend() {
        let path = write_csv(TABLE);
        let result = forecast_for_state(&StateStatsSource::new(&path), "NY").unwrap();

        // History ends at 980 and grows about 20 per day.
        let first = result.confirmed[0];
        let last = result.confirmed[FORECAST_STEPS - 1];
        assert!((985..=1015).contains(&first), "first forecast {first}");
        assert!(last > first, "expected growth, got {first} -> {last}");

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let path = write_csv(TABLE);
        let source = StateStatsSource::new(&path);

        let upper = forecast_for_state(&source, "NY").unwrap();
        let lower = forecast_for_state(&source, "ny").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(lower.state, "NY");

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn first_case_variant_wins() {
        let path = write_csv(
            "region,totalInfected,activeCases,recovered,death\nny,10,0,0,0\nNY,1000,0,0,0\n",
        );
        let result = forecast_for_state(&StateStatsSource::new(&path), "Ny").unwrap();
        assert_eq!(result.state, "ny");

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn unknown_state_is_not_found() {
        let path = write_csv(TABLE);
        let err = forecast_for_state(&StateStatsSource::new(&path), "Atlantis").unwrap_err();

        match err {
            ForecastError::StateNotFound { state } => assert_eq!(state, "Atlantis"),
            other => panic!("unexpected error: {other}"),
        }

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn zero_totals_forecast_zero() {
        let path = write_csv(TABLE);
        let result = forecast_for_state(&StateStatsSource::new(&path), "quiet").unwrap();

        assert_eq!(result.confirmed, vec![0; FORECAST_STEPS]);
        assert_eq!(result.recovered, vec![0; FORECAST_STEPS]);
        assert_eq!(result.deaths, vec![0; FORECAST_STEPS]);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_table_propagates() {
        let path = std::env::temp_dir().join(format!("absent-{}.csv", uuid::Uuid::new_v4()));
        let source = StateStatsSource::new(&path);

        let err = forecast_for_state(&source, "NY").unwrap_err();
        assert!(matches!(
            err,
            ForecastError::Stats(StatsError::DataSourceMissing { .. })
        ));
        assert!(err.to_string().contains(&path.display().to_string()));

        let err = list_known_states(&source).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::Stats(StatsError::DataSourceMissing { .. })
        ));
    }

    #[test]
    fn rounds_half_to_even() {
        assert_eq!(round_count(2.5), 2);
        assert_eq!(round_count(3.5), 4);
        assert_eq!(round_count(-0.4), 0);
        assert_eq!(round_count(7.6), 8);
    }

    fn kerala() -> StateAggregate {
        StateAggregate {
            state: "Kerala".to_string(),
            confirmed: 1000,
            recovered: 750,
            deaths: 75,
            active: 175,
        }
    }

    #[test]
    fn failing_metric_aborts_whole_forecast() {
        let mut calls = 0;
        let err = forecast_with(&kerala(), |history| {
            calls += 1;
            if calls == 3 {
                Err(ModelError::Singular)
            } else {
                Ok(history[..FORECAST_STEPS].to_vec())
            }
        })
        .unwrap_err();

        assert_eq!(calls, 3);
        match err {
            ForecastError::ModelFit { metric, source } => {
                assert_eq!(metric, Metric::Deaths);
                assert_eq!(source, ModelError::Singular);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn first_failure_skips_remaining_metrics() {
        let mut calls = 0;
        let err = forecast_with(&kerala(), |_| {
            calls += 1;
            Err(ModelError::Diverged { step: 4 })
        })
        .unwrap_err();

        assert_eq!(calls, 1);
        assert!(matches!(
            err,
            ForecastError::ModelFit {
                metric: Metric::Confirmed,
                ..
            }
        ));
        assert!(err.to_string().starts_with("An error occurred during prediction: confirmed"));
    }

    #[test]
    fn forecast_aggregate_uses_state_model() {
        let result = forecast_aggregate(&kerala()).unwrap();

        assert_eq!(result.state, "Kerala");
        assert_eq!(result.confirmed.len(), FORECAST_STEPS);
        assert_eq!(result.deaths.len(), FORECAST_STEPS);
    }

    #[test]
    fn model_fit_error_names_metric() {
        let err = ForecastError::ModelFit {
            metric: Metric::Deaths,
            source: ModelError::Singular,
        };
        let message = err.to_string();
        assert!(message.starts_with("An error occurred during prediction"));
        assert!(message.contains("deaths"));
    }
}
