use std::path::Path;

use plotters::prelude::*;

use crate::config::ChartStyle;
use crate::engine::Table;
use crate::error::AppResult;

use super::series::{ChartSeries, padded_range, table_series_since, x_range};

/// One family drawn as a panel of a grouped chart.
#[derive(Debug, Clone, Copy)]
pub struct Panel<'a> {
    pub name: &'a str,
    pub table: &'a Table,
    pub style: &'a ChartStyle,
}

/// Per-panel series measured from the earliest row of any panel.
pub(super) fn panel_series(panels: &[Panel<'_>]) -> Vec<Vec<ChartSeries>> {
    let origin = panels
        .iter()
        .filter_map(|panel| panel.table.index().first().copied())
        .min();
    panels
        .iter()
        .map(|panel| match origin {
            Some(origin) => table_series_since(panel.table, origin),
            None => Vec::new(),
        })
        .collect()
}

/// Draws each panel as a line chart, stacked vertically over a shared
/// time axis.
///
/// # Errors
///
/// Returns an error when plotting fails.
pub fn plot_panels_chart(panels: &[Panel<'_>], path: &Path) -> AppResult<()> {
    let series = panel_series(panels);
    let all: Vec<ChartSeries> = series.iter().flatten().cloned().collect();
    let shared_x = x_range(&all);
    let rows = panels.len().max(1);
    let height = u32::try_from(rows.saturating_mul(400)).unwrap_or(u32::MAX);

    let root = BitMapBackend::new(path, (1600, height)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((rows, 1));

    for (position, ((panel, lines), area)) in panels.iter().zip(&series).zip(&areas).enumerate() {
        let (min_y, max_y) = lines
            .iter()
            .flat_map(|line| line.points.iter().map(|&(_, y)| y))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), y| {
                (min.min(y), max.max(y))
            });

        let mut chart = ChartBuilder::on(area)
            .caption(panel.style.title.as_str(), ("sans-serif", 24).into_font())
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(shared_x.clone(), padded_range(min_y, max_y))?;

        let last = position.saturating_add(1) == panels.len();
        chart
            .configure_mesh()
            .x_desc(if last { "Elapsed Time (seconds)" } else { "" })
            .y_desc(panel.style.unit.as_str())
            .draw()?;

        for (idx, line) in lines.iter().enumerate() {
            let color = Palette99::pick(idx).to_rgba();
            chart
                .draw_series(LineSeries::new(
                    line.points.iter().copied(),
                    color.stroke_width(2),
                ))?
                .label(line.name.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x.saturating_add(20), y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()?;
    }

    root.present()?;
    Ok(())
}
