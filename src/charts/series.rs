use std::ops::Range;

use crate::engine::Table;
use crate::samples::Timestamp;

/// One plotted column: `(seconds since the first row, value)` points.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

/// Seconds since the first row, one per row.
pub(super) fn row_seconds(table: &Table) -> Vec<f64> {
    match table.index().first() {
        Some(&origin) => seconds_since(table, origin),
        None => Vec::new(),
    }
}

fn seconds_since(table: &Table, origin: Timestamp) -> Vec<f64> {
    table
        .index()
        .iter()
        .map(|timestamp| timestamp.seconds_since(origin))
        .collect()
}

/// Splits a table into one series per column, skipping absent cells.
#[must_use]
pub fn table_series(table: &Table) -> Vec<ChartSeries> {
    match table.index().first() {
        Some(&origin) => table_series_since(table, origin),
        None => Vec::new(),
    }
}

/// Like [`table_series`], with x measured from `origin` so several tables
/// can share one time axis.
#[must_use]
pub fn table_series_since(table: &Table, origin: Timestamp) -> Vec<ChartSeries> {
    let seconds = seconds_since(table, origin);

    table
        .columns()
        .iter()
        .zip(table.column_cells())
        .map(|(name, cells)| ChartSeries {
            name: name.clone(),
            points: seconds
                .iter()
                .zip(cells)
                .filter_map(|(&x, cell)| cell.map(|y| (x, y)))
                .collect(),
        })
        .collect()
}

/// Filesystem-safe stem for a family name: unsafe characters become `-`.
#[must_use]
pub fn family_file_stem(family: &str) -> String {
    let sanitized: String = family
        .chars()
        .map(|ch| match ch {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' => ch,
            _ => '-',
        })
        .collect();
    let stem = sanitized.trim_matches('.');
    if stem.is_empty() {
        return "family".to_owned();
    }
    stem.to_owned()
}

#[must_use]
pub fn chart_file_name(family: &str) -> String {
    format!("{}.png", family_file_stem(family))
}

pub(super) fn x_range(series: &[ChartSeries]) -> Range<f64> {
    let max_x = series
        .iter()
        .flat_map(|series| series.points.iter().map(|&(x, _)| x))
        .fold(0.0_f64, f64::max);
    if max_x > 0.0 { 0.0..max_x } else { 0.0..1.0 }
}

/// Pads `[min, max]` by 5% so lines do not sit on the frame.
pub(super) fn padded_range(min: f64, max: f64) -> Range<f64> {
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let span = max - min;
    if span <= f64::EPSILON {
        let pad = if min.abs() > f64::EPSILON { min.abs() * 0.05 } else { 1.0 };
        return (min - pad)..(max + pad);
    }
    let pad = span * 0.05;
    (min - pad)..(max + pad)
}
