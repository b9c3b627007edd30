//! Per-region statistics table reader.
//!
//! The table is a headered CSV. Only the five columns named in
//! [`outbreak_stats_models`] are read; anything else is ignored.

use std::io::Read;
use std::path::Path;

use outbreak_stats_models::{
    ACTIVE_CASES_COLUMN, DEATH_COLUMN, REGION_COLUMN, RECOVERED_COLUMN, RawRegionRecord,
    TOTAL_INFECTED_COLUMN,
};

use crate::StatsError;

/// Largest float that still represents every integer below it exactly.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Column positions resolved from the header row.
struct ColumnIndex {
    region: usize,
    total_infected: usize,
    active_cases: usize,
    recovered: usize,
    death: usize,
}

impl ColumnIndex {
    fn resolve(headers: &[String]) -> Result<Self, StatsError> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or(StatsError::MissingColumn { column })
        };

        Ok(Self {
            region: find(REGION_COLUMN)?,
            total_infected: find(TOTAL_INFECTED_COLUMN)?,
            active_cases: find(ACTIVE_CASES_COLUMN)?,
            recovered: find(RECOVERED_COLUMN)?,
            death: find(DEATH_COLUMN)?,
        })
    }
}

/// Loads every row of the table at `path`.
///
/// # Errors
///
/// * [`StatsError::DataSourceMissing`] if `path` does not exist
/// * otherwise any error from [`parse_records`]
pub fn load_records(path: &Path) -> Result<Vec<RawRegionRecord>, StatsError> {
    if !path.exists() {
        log::warn!("Statistics table not found at {}", path.display());
        return Err(StatsError::DataSourceMissing {
            path: path.to_path_buf(),
        });
    }

    let file = std::fs::File::open(path)?;
    let records = parse_records(file)?;

    log::debug!("Read {} region rows from {}", records.len(), path.display());

    Ok(records)
}

/// Parses region rows from any CSV source.
///
/// Header names are trimmed before matching. Empty numeric cells count as
/// zero. Rows with a blank region label are skipped.
///
/// # Errors
///
/// * [`StatsError::MissingColumn`] if a required header is absent
/// * [`StatsError::InvalidValue`] if a numeric cell is not a non-negative
///   whole number
/// * [`StatsError::Csv`] if the CSV itself is malformed
pub fn parse_records(reader: impl Read) -> Result<Vec<RawRegionRecord>, StatsError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();
    let index = ColumnIndex::resolve(&headers)?;

    let mut records = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let row = i + 1;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        if cell(index.region).trim().is_empty() {
            log::warn!("Skipping row {row}: region label is blank");
            continue;
        }

        records.push(RawRegionRecord {
            region: cell(index.region).to_owned(),
            total_infected: parse_count(cell(index.total_infected), row, TOTAL_INFECTED_COLUMN)?,
            active_cases: parse_count(cell(index.active_cases), row, ACTIVE_CASES_COLUMN)?,
            recovered: parse_count(cell(index.recovered), row, RECOVERED_COLUMN)?,
            death: parse_count(cell(index.death), row, DEATH_COLUMN)?,
        });
    }

    Ok(records)
}

/// Parses a count cell. Accepts plain integers and whole-valued decimals
/// such as `12.0`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
fn parse_count(raw: &str, row: usize, column: &'static str) -> Result<u64, StatsError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    if let Ok(value) = trimmed.parse::<u64>() {
        return Ok(value);
    }

    match trimmed.parse::<f64>() {
        Ok(value)
            if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= MAX_EXACT_FLOAT =>
        {
            Ok(value as u64)
        }
        _ => Err(StatsError::InvalidValue {
            row,
            column,
            value: raw.to_owned(),
        }),
    }
}
