#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Per-state aggregation of regional outbreak statistics.
//!
//! Reads the flat per-region CSV table, maps its columns onto the canonical
//! metric names and sums every metric per state label. Nothing is cached:
//! each call to [`get_state_aggregates`] re-reads the file so callers always
//! see what is currently on disk.

pub mod aggregate;
pub mod table;

use std::path::{Path, PathBuf};

use outbreak_stats_models::StateAggregate;
use thiserror::Error;

pub use aggregate::aggregate;
pub use table::{load_records, parse_records};

/// Default location of the per-region statistics table.
pub const DEFAULT_DATA_PATH: &str = "data/statestats.csv";

/// Environment variable that overrides [`DEFAULT_DATA_PATH`].
pub const DATA_PATH_ENV: &str = "STATE_STATS_PATH";

/// Errors that can occur while loading or aggregating statistics.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The statistics table does not exist at the configured location.
    #[error("Data file not found. Please place it at {}", path.display())]
    DataSourceMissing {
        /// Expected location of the table.
        path: PathBuf,
    },

    /// A required column is absent from the header row.
    #[error("Required column '{column}' is missing from the statistics table")]
    MissingColumn {
        /// Source header name that was expected.
        column: &'static str,
    },

    /// A numeric cell could not be read as a non-negative count.
    #[error("Invalid value '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        /// 1-based data row number (the header is row 0).
        row: usize,
        /// Source header name of the cell.
        column: &'static str,
        /// Raw cell content.
        value: String,
    },

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Reading the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Location of the per-region statistics table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateStatsSource {
    path: PathBuf,
}

impl StateStatsSource {
    /// Creates a source reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Builds the source from `STATE_STATS_PATH`, falling back to
    /// [`DEFAULT_DATA_PATH`] when the variable is unset or empty.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(DATA_PATH_ENV)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map_or_else(Self::default, Self::new)
    }

    /// Path of the table on disk.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for StateStatsSource {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_PATH)
    }
}

/// Reads the table and returns one aggregate per distinct state label.
///
/// Rows are grouped by exact (case-sensitive) label. Output follows the
/// order in which each label first appears in the table.
///
/// # Errors
///
/// * [`StatsError::DataSourceMissing`] if the table does not exist
/// * [`StatsError::MissingColumn`] or [`StatsError::InvalidValue`] if the
///   table does not have the expected shape
/// * [`StatsError::Csv`] / [`StatsError::Io`] if reading fails
pub fn get_state_aggregates(source: &StateStatsSource) -> Result<Vec<StateAggregate>, StatsError> {
    let records = load_records(source.path())?;
    let aggregates = aggregate(&records);

    log::debug!(
        "Aggregated {} region rows into {} states from {}",
        records.len(),
        aggregates.len(),
        source.path().display()
    );

    Ok(aggregates)
}
