//! Synthetic daily history built from a single current total.
//!
//! The source table only holds today's totals, so each model is fitted on a
//! fabricated trend: the current value discounted linearly backward in time
//! by a fixed daily rate.

use outbreak_forecast_models::HISTORY_DAYS;

/// Builds [`HISTORY_DAYS`] values ending just before today.
///
/// `value[i] = floor(current * (1 - decay * (HISTORY_DAYS - i)))`, so index 0
/// is the most discounted and the last index is one day's decay below
/// `current`. Values are not clamped at zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn synthetic_history(current: u64, decay: f64) -> Vec<f64> {
    let current = current as f64;
    (0..HISTORY_DAYS)
        .map(|i| {
            let days_back = (HISTORY_DAYS - i) as f64;
            (current * (1.0 - decay * days_back)).floor()
        })
        .collect()
}
