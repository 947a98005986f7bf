//! PNG rendering of derived family tables.
mod area;
mod line;
mod panels;
mod series;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{error, info, warn};

use crate::config::{ChartKind, ChartStyle};
use crate::engine::Table;
use crate::error::AppResult;

pub use area::plot_stacked_area_chart;
pub use line::plot_line_chart;
pub use panels::{Panel, plot_panels_chart};
pub use series::{
    ChartSeries, chart_file_name, family_file_stem, table_series, table_series_since,
};

/// Renders one family table into `<charts_dir>/<family>.png`.
///
/// Returns the written path, or `None` when the table has no rows.
///
/// # Errors
///
/// Returns an error when the output directory cannot be created or the
/// chart cannot be drawn.
pub async fn plot_family(
    family: &str,
    table: &Table,
    style: &ChartStyle,
    charts_dir: &Path,
) -> AppResult<Option<PathBuf>> {
    if table.is_empty() {
        warn!("Family '{}' has no rows; chart skipped", family);
        return Ok(None);
    }

    if let Err(e) = fs::create_dir_all(charts_dir).await {
        error!(
            "Failed to create output directory '{}': {}",
            charts_dir.display(),
            e
        );
        return Err(e.into());
    }

    let path = charts_dir.join(chart_file_name(family));
    info!("Plotting {} ({})...", family, style.kind.as_str());
    match style.kind {
        ChartKind::Line => plot_line_chart(&table_series(table), style, &path)?,
        ChartKind::StackedArea => plot_stacked_area_chart(table, style, &path)?,
    }
    Ok(Some(path))
}

/// Renders a chart group into `<charts_dir>/<group>.png`, one panel per
/// family in the given order. Families without rows are left out.
///
/// Returns the written path, or `None` when no family has rows.
///
/// # Errors
///
/// Returns an error when the output directory cannot be created or the
/// chart cannot be drawn.
pub async fn plot_group(
    group: &str,
    panels: &[Panel<'_>],
    charts_dir: &Path,
) -> AppResult<Option<PathBuf>> {
    let drawn: Vec<Panel<'_>> = panels
        .iter()
        .filter(|panel| {
            if panel.table.is_empty() {
                warn!("Family '{}' has no rows; left out of '{}'", panel.name, group);
            }
            !panel.table.is_empty()
        })
        .copied()
        .collect();
    if drawn.is_empty() {
        warn!("Chart group '{}' has no rows; chart skipped", group);
        return Ok(None);
    }

    if let Err(e) = fs::create_dir_all(charts_dir).await {
        error!(
            "Failed to create output directory '{}': {}",
            charts_dir.display(),
            e
        );
        return Err(e.into());
    }

    let path = charts_dir.join(chart_file_name(group));
    info!("Plotting {} ({} panels)...", group, drawn.len());
    plot_panels_chart(&drawn, &path)?;
    Ok(Some(path))
}
