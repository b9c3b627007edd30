#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Outbreak statistic types shared by the aggregator, forecaster and API.
//!
//! A [`RawRegionRecord`] is one row of the per-region source table. Rows
//! sharing a region label are summed into a [`StateAggregate`].

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Source CSV header for the region/state label.
pub const REGION_COLUMN: &str = "region";
/// Source CSV header for the total infected count.
pub const TOTAL_INFECTED_COLUMN: &str = "totalInfected";
/// Source CSV header for the active case count.
pub const ACTIVE_CASES_COLUMN: &str = "activeCases";
/// Source CSV header for the recovered count.
pub const RECOVERED_COLUMN: &str = "recovered";
/// Source CSV header for the death count.
pub const DEATH_COLUMN: &str = "death";

/// One row of the per-region statistics table, as read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRegionRecord {
    /// Region label. Used verbatim as the aggregation key.
    pub region: String,
    /// Total infected count.
    pub total_infected: u64,
    /// Active case count.
    pub active_cases: u64,
    /// Recovered count.
    pub recovered: u64,
    /// Death count.
    pub death: u64,
}

/// Summed metrics for every region row sharing one state label.
///
/// Serialized with capitalized keys (`State`, `Confirmed`, ...) since the
/// dashboard consumes the table in that shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StateAggregate {
    /// State label, exactly as stored in the source table.
    pub state: String,
    /// Sum of total infected counts.
    pub confirmed: u64,
    /// Sum of recovered counts.
    pub recovered: u64,
    /// Sum of death counts.
    pub deaths: u64,
    /// Sum of active case counts.
    pub active: u64,
}

impl StateAggregate {
    /// Creates an empty aggregate for `state`.
    #[must_use]
    pub fn empty(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            confirmed: 0,
            recovered: 0,
            deaths: 0,
            active: 0,
        }
    }

    /// Adds one region row into this aggregate.
    ///
    /// Sums saturate at `u64::MAX` instead of wrapping.
    pub const fn add(&mut self, record: &RawRegionRecord) {
        self.confirmed = self.confirmed.saturating_add(record.total_infected);
        self.recovered = self.recovered.saturating_add(record.recovered);
        self.deaths = self.deaths.saturating_add(record.death);
        self.active = self.active.saturating_add(record.active_cases);
    }

    /// Returns the current total for a forecastable metric.
    #[must_use]
    pub const fn value(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Confirmed => self.confirmed,
            Metric::Recovered => self.recovered,
            Metric::Deaths => self.deaths,
        }
    }
}

/// Metric that gets a forecast.
///
/// Active cases are aggregated but never forecast directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Metric {
    /// Total confirmed infections.
    Confirmed,
    /// Recoveries.
    Recovered,
    /// Deaths.
    Deaths,
}

impl Metric {
    /// Every forecast metric, in response order.
    pub const ALL: [Self; 3] = [Self::Confirmed, Self::Recovered, Self::Deaths];

    /// Daily backward decay rate used to synthesize a history for this
    /// metric.
    #[must_use]
    pub const fn decay_rate(self) -> f64 {
        match self {
            Self::Confirmed | Self::Recovered => 0.02,
            Self::Deaths => 0.01,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(region: &str, confirmed: u64) -> RawRegionRecord {
        RawRegionRecord {
            region: region.to_string(),
            total_infected: confirmed,
            active_cases: 1,
            recovered: 2,
            death: 3,
        }
    }

    #[test]
    fn add_sums_every_metric() {
        let mut agg = StateAggregate::empty("NY");
        agg.add(&record("NY", 10));
        agg.add(&record("NY", 5));

        assert_eq!(agg.confirmed, 15);
        assert_eq!(agg.active, 2);
        assert_eq!(agg.recovered, 4);
        assert_eq!(agg.deaths, 6);
    }

    #[test]
    fn add_saturates() {
        let mut agg = StateAggregate::empty("NY");
        agg.add(&record("NY", u64::MAX));
        agg.add(&record("NY", 1));
        assert_eq!(agg.confirmed, u64::MAX);
    }

    #[test]
    fn aggregate_serializes_with_capitalized_keys() {
        let agg = StateAggregate {
            state: "Kerala".to_string(),
            confirmed: 4,
            recovered: 3,
            deaths: 1,
            active: 0,
        };
        let json = serde_json::to_value(&agg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "State": "Kerala",
                "Confirmed": 4,
                "Recovered": 3,
                "Deaths": 1,
                "Active": 0,
            })
        );
    }

    #[test]
    fn metric_names() {
        assert_eq!(Metric::Confirmed.to_string(), "confirmed");
        assert_eq!("Deaths".parse::<Metric>().unwrap(), Metric::Deaths);
        assert!("active".parse::<Metric>().is_err());
    }

    #[test]
    fn decay_rates() {
        assert!((Metric::Confirmed.decay_rate() - 0.02).abs() < f64::EPSILON);
        assert!((Metric::Recovered.decay_rate() - 0.02).abs() < f64::EPSILON);
        assert!((Metric::Deaths.decay_rate() - 0.01).abs() < f64::EPSILON);
    }

    #[test]
    fn value_selects_metric() {
        let agg = StateAggregate {
            state: "CA".to_string(),
            confirmed: 7,
            recovered: 5,
            deaths: 2,
            active: 0,
        };
        assert_eq!(agg.value(Metric::Confirmed), 7);
        assert_eq!(agg.value(Metric::Recovered), 5);
        assert_eq!(agg.value(Metric::Deaths), 2);
    }
}
