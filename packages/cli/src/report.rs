//! Plain-text tables for terminal output.

use outbreak_forecast_models::ForecastResult;
use outbreak_stats_models::StateAggregate;

/// Renders aggregated totals as a right-aligned table, one state per row.
#[must_use]
pub fn stats_table(aggregates: &[StateAggregate]) -> String {
    let header = ["State", "Confirmed", "Active", "Recovered", "Deaths"];
    let rows: Vec<[String; 5]> = aggregates
        .iter()
        .map(|agg| {
            [
                agg.state.clone(),
                agg.confirmed.to_string(),
                agg.active.to_string(),
                agg.recovered.to_string(),
                agg.deaths.to_string(),
            ]
        })
        .collect();

    render(&header, &rows)
}

/// Renders a forecast with one row per day.
#[must_use]
pub fn forecast_table(result: &ForecastResult) -> String {
    let header = ["Day", "Confirmed", "Recovered", "Deaths", "Active"];
    let rows: Vec<[String; 5]> = result
        .days()
        .into_iter()
        .map(|day| {
            [
                day.day.to_string(),
                day.confirmed.to_string(),
                day.recovered.to_string(),
                day.deaths.to_string(),
                day.active.to_string(),
            ]
        })
        .collect();

    let mut out = format!("Forecast for {}\n", result.state);
    out.push_str(&render(&header, &rows));
    out
}

/// First column left-aligned, the rest right-aligned.
fn render<const N: usize>(header: &[&str; N], rows: &[[String; N]]) -> String {
    let mut widths = header.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let mut line = |cells: &[&str]| {
        for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
            if i == 0 {
                out.push_str(&format!("{cell:<width$}"));
            } else {
                out.push_str(&format!("  {cell:>width$}"));
            }
        }
        out.push('\n');
    };

    line(header);
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        line(&cells);
    }

    out
}
