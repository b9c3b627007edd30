//! Autoregressive integrated models without moving-average terms.
//!
//! The series is differenced `d` times, AR coefficients are estimated by
//! conditional least squares on the differenced values (no intercept), and
//! forecasts are produced recursively before being integrated back onto the
//! original scale.

use outbreak_forecast_models::ArimaOrder;
use thiserror::Error;

/// Relative ridge added to the normal equations so that perfectly linear
/// trends (rank-one lag matrices) remain solvable.
const RIDGE: f64 = 1e-8;

/// Pivots smaller than this fraction of the mean diagonal are singular.
const PIVOT_EPSILON: f64 = 1e-14;

/// Errors from fitting or forecasting a model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Moving-average terms are not supported.
    #[error("{order} is not supported: moving-average terms must be zero")]
    UnsupportedOrder {
        /// Requested order.
        order: ArimaOrder,
    },

    /// The series has too few observations for the requested order.
    #[error("Series too short: need at least {needed} observations, got {got}")]
    TooShort {
        /// Minimum number of observations.
        needed: usize,
        /// Observations provided.
        got: usize,
    },

    /// The series contains NaN or infinity.
    #[error("Series contains a non-finite value at index {index}")]
    NonFinite {
        /// Index of the first offending value.
        index: usize,
    },

    /// The least-squares system could not be solved.
    #[error("Autoregressive coefficients could not be estimated: singular system")]
    Singular,

    /// Recursive forecasting produced a non-finite value.
    #[error("Forecast diverged at step {step}")]
    Diverged {
        /// 1-based forecast step.
        step: usize,
    },
}

/// Unfitted model of a given order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arima {
    order: ArimaOrder,
}

impl Arima {
    /// Creates a model of the given order.
    #[must_use]
    pub const fn new(order: ArimaOrder) -> Self {
        Self { order }
    }

    /// Minimum series length this model can be fitted on.
    #[must_use]
    pub const fn min_observations(&self) -> usize {
        self.order.p + self.order.d + 1
    }

    /// Fits the model to `series`.
    ///
    /// # Errors
    ///
    /// * [`ModelError::UnsupportedOrder`] if the order has MA terms
    /// * [`ModelError::TooShort`] if `series` is shorter than
    ///   [`Self::min_observations`]
    /// * [`ModelError::NonFinite`] if `series` contains NaN or infinity
    /// * [`ModelError::Singular`] if the coefficients cannot be solved for
    pub fn fit(&self, series: &[f64]) -> Result<FittedArima, ModelError> {
        let order = self.order;
        if order.q > 0 {
            return Err(ModelError::UnsupportedOrder { order });
        }

        let needed = self.min_observations();
        if series.len() < needed {
            return Err(ModelError::TooShort {
                needed,
                got: series.len(),
            });
        }

        if let Some(index) = series.iter().position(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite { index });
        }

        // Last value of each integration level, outermost first.
        let mut tails = Vec::with_capacity(order.d);
        let mut working = series.to_vec();
        for _ in 0..order.d {
            if let Some(&last) = working.last() {
                tails.push(last);
            }
            working = difference(&working);
        }

        let coefficients = estimate_ar(&working, order.p)?;

        Ok(FittedArima {
            coefficients,
            tails,
            differenced: working,
        })
    }
}

/// A fitted model, ready to forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedArima {
    coefficients: Vec<f64>,
    tails: Vec<f64>,
    differenced: Vec<f64>,
}

impl FittedArima {
    /// Estimated AR coefficients, lag 1 first.
    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Forecasts `steps` values past the end of the fitted series, on the
    /// original (undifferenced) scale.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Diverged`] if a forecast is not finite.
    pub fn forecast(&self, steps: usize) -> Result<Vec<f64>, ModelError> {
        let mut extended = self.differenced.clone();
        let mut tails = self.tails.clone();
        let mut forecasts = Vec::with_capacity(steps);

        for step in 1..=steps {
            let n = extended.len();
            let next: f64 = self
                .coefficients
                .iter()
                .enumerate()
                .filter(|(j, _)| n > *j)
                .map(|(j, phi)| phi * extended[n - j - 1])
                .sum();
            extended.push(next);

            let mut value = next;
            for tail in tails.iter_mut().rev() {
                *tail += value;
                value = *tail;
            }

            if !value.is_finite() {
                return Err(ModelError::Diverged { step });
            }
            forecasts.push(value);
        }

        Ok(forecasts)
    }
}

fn difference(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Conditional least-squares AR(p) estimate without intercept.
#[allow(clippy::float_cmp, clippy::needless_range_loop)]
fn estimate_ar(values: &[f64], p: usize) -> Result<Vec<f64>, ModelError> {
    if p == 0 {
        return Ok(Vec::new());
    }

    let mut xtx = vec![vec![0.0; p]; p];
    let mut xty = vec![0.0; p];

    for t in p..values.len() {
        for j in 0..p {
            let xj = values[t - j - 1];
            xty[j] += xj * values[t];
            for k in 0..p {
                xtx[j][k] += xj * values[t - k - 1];
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let scale = (0..p).map(|i| xtx[i][i]).sum::<f64>() / p as f64;
    if scale == 0.0 {
        // Every lagged value is zero: nothing to regress on.
        return Ok(vec![0.0; p]);
    }

    for (i, row) in xtx.iter_mut().enumerate() {
        row[i] += scale * RIDGE;
    }

    solve(xtx, xty, scale * PIVOT_EPSILON)
}

/// Solves `a * x = b` by Gauss-Jordan elimination with partial pivoting.
#[allow(clippy::float_cmp, clippy::needless_range_loop)]
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>, min_pivot: f64) -> Result<Vec<f64>, ModelError> {
    let n = b.len();

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&x, &y| a[x][col].abs().total_cmp(&a[y][col].abs()))
            .unwrap_or(col);

        let pivot = a[pivot_row][col];
        if !pivot.is_finite() || pivot.abs() < min_pivot {
            return Err(ModelError::Singular);
        }

        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for k in col..n {
            a[col][k] /= pivot;
        }
        b[col] /= pivot;

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = a[row][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    if b.iter().all(|v| v.is_finite()) {
        Ok(b)
    } else {
        Err(ModelError::Singular)
    }
}
