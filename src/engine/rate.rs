use std::num::NonZeroUsize;

use tracing::debug;

use super::{
    AlignedTable, DEFAULT_WINDOW, DerivedTable, MetricKind, RateTable, ResetPolicy, Table,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeriveOptions {
    pub kind: MetricKind,
    /// Compare each row against the row this many ticks earlier.
    pub window: NonZeroUsize,
    pub unit_scale: f64,
    pub reset_policy: ResetPolicy,
}

impl Default for DeriveOptions {
    fn default() -> Self {
        Self {
            kind: MetricKind::Cumulative,
            window: DEFAULT_WINDOW,
            unit_scale: 1.0,
            reset_policy: ResetPolicy::default(),
        }
    }
}

/// Rows dropped while deriving rates, by cause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeriveStats {
    /// Leading rows with no full window behind them.
    pub warmup_rows: usize,
    /// Rows whose window spans zero or negative time.
    pub degenerate_windows: usize,
    /// Cells whose counter went backwards inside the window.
    pub counter_resets: usize,
    /// Rows dropped because at least one cell had no rate.
    pub incomplete_rows: usize,
}

/// Runs the rate deriver for either metric kind.
#[must_use]
pub fn derive(aligned: AlignedTable, options: &DeriveOptions) -> DerivedTable {
    match options.kind {
        MetricKind::Cumulative => DerivedTable::Rates(derive_rates(
            aligned.table(),
            options.window,
            options.unit_scale,
            options.reset_policy,
        )),
        MetricKind::Instantaneous => {
            DerivedTable::Measures(scale_measures(aligned, options.unit_scale))
        }
    }
}

/// Windowed finite difference of a cumulative counter table.
///
/// For each row `i >= window`, every cell becomes
/// `(v[i] - v[i - window]) / (t[i] - t[i - window]) * unit_scale` with the
/// time delta in seconds. Rows whose time delta is not strictly positive,
/// and rows left with any absent cell, are dropped and counted.
#[must_use]
pub fn derive_rates(
    table: &Table,
    window: NonZeroUsize,
    unit_scale: f64,
    reset_policy: ResetPolicy,
) -> RateTable {
    let lag = window.get();
    let rows = table.row_count();
    let index = table.index();
    let mut stats = DeriveStats {
        warmup_rows: rows.min(lag),
        ..DeriveStats::default()
    };
    let mut out_index = Vec::with_capacity(rows.saturating_sub(lag));
    let mut out_cells: Vec<Vec<Option<f64>>> = vec![Vec::new(); table.column_count()];
    let mut row_rates = Vec::with_capacity(table.column_count());

    for current in lag..rows {
        let previous = current.saturating_sub(lag);
        let (Some(&now), Some(&then)) = (index.get(current), index.get(previous)) else {
            continue;
        };
        let elapsed = now.seconds_since(then);
        if elapsed <= 0.0 {
            stats.degenerate_windows = stats.degenerate_windows.saturating_add(1);
            debug!(
                "Window ending at {} spans {}s; row dropped",
                now, elapsed
            );
            continue;
        }

        row_rates.clear();
        for column in table.column_cells() {
            let before = column.get(previous).copied().flatten();
            let after = column.get(current).copied().flatten();
            let rate = match (before, after) {
                (Some(before), Some(after)) => {
                    let delta = after - before;
                    if delta < 0.0 && reset_policy == ResetPolicy::Skip {
                        stats.counter_resets = stats.counter_resets.saturating_add(1);
                        None
                    } else {
                        Some(delta / elapsed * unit_scale)
                    }
                }
                _ => None,
            };
            row_rates.push(rate);
        }

        if row_rates.iter().any(Option::is_none) {
            stats.incomplete_rows = stats.incomplete_rows.saturating_add(1);
            continue;
        }
        out_index.push(now);
        for (column, rate) in out_cells.iter_mut().zip(&row_rates) {
            column.push(*rate);
        }
    }

    let table = Table::from_parts(out_index, table.columns().to_vec(), out_cells);
    RateTable::new(table, stats)
}

/// Multiplies every present reading by `unit_scale`; rows are untouched.
#[must_use]
pub fn scale_measures(aligned: AlignedTable, unit_scale: f64) -> AlignedTable {
    AlignedTable::new(aligned.into_table().map_present(|value| value * unit_scale))
}
