use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;

use crate::config::ChartStyle;
use crate::engine::Table;
use crate::error::AppResult;

use super::series::{padded_range, row_seconds};

/// Band edges of a stacked chart, bottom to top.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct StackedBands {
    /// Seconds since the first row, one per table row.
    pub(super) xs: Vec<f64>,
    /// `edges[k][i]` is the sum of the first `k` columns at row `i`.
    pub(super) edges: Vec<Vec<f64>>,
}

impl StackedBands {
    /// Accumulates the columns row by row; absent cells count as zero.
    pub(super) fn from_table(table: &Table) -> Self {
        let xs = row_seconds(table);
        let mut edges = Vec::with_capacity(table.column_count().saturating_add(1));
        let mut running = vec![0.0_f64; xs.len()];
        edges.push(running.clone());
        for cells in table.column_cells() {
            for (total, cell) in running.iter_mut().zip(cells) {
                *total += cell.unwrap_or(0.0);
            }
            edges.push(running.clone());
        }
        Self { xs, edges }
    }

    /// Y range covering every edge, always including zero.
    pub(super) fn y_range(&self) -> Range<f64> {
        let (min, max) = self
            .edges
            .iter()
            .flatten()
            .fold((0.0_f64, 0.0_f64), |(min, max), &y| (min.min(y), max.max(y)));
        let padded = padded_range(min, max);
        let floor = if min < 0.0 { padded.start } else { 0.0 };
        floor..padded.end
    }
}

/// Draws the table's columns stacked on top of each other, first column at
/// the bottom.
///
/// # Errors
///
/// Returns an error when plotting fails.
pub fn plot_stacked_area_chart(table: &Table, style: &ChartStyle, path: &Path) -> AppResult<()> {
    let bands = StackedBands::from_table(table);
    let max_x = bands.xs.last().copied().unwrap_or(0.0);
    let x_range = if max_x > 0.0 { 0.0..max_x } else { 0.0..1.0 };

    let root = BitMapBackend::new(path, (1600, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(style.title.as_str(), ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, bands.y_range())?;

    chart
        .configure_mesh()
        .x_desc("Elapsed Time (seconds)")
        .y_desc(style.unit.as_str())
        .draw()?;

    for (idx, (name, pair)) in table.columns().iter().zip(bands.edges.windows(2)).enumerate() {
        let (Some(lower), Some(upper)) = (pair.first(), pair.get(1)) else {
            continue;
        };
        let color = Palette99::pick(idx).to_rgba();
        let outline: Vec<(f64, f64)> = bands
            .xs
            .iter()
            .copied()
            .zip(upper.iter().copied())
            .chain(bands.xs.iter().copied().zip(lower.iter().copied()).rev())
            .collect();
        chart
            .draw_series(std::iter::once(Polygon::new(outline, color.mix(0.7).filled())))?
            .label(name.as_str())
            .legend(move |(x, y)| {
                Rectangle::new(
                    [(x, y.saturating_sub(5)), (x.saturating_add(20), y.saturating_add(5))],
                    color.filled(),
                )
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}
