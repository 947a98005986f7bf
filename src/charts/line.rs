use std::path::Path;

use plotters::prelude::*;

use crate::config::ChartStyle;
use crate::error::AppResult;

use super::series::{ChartSeries, padded_range, x_range};

/// Draws each series as its own line.
///
/// # Errors
///
/// Returns an error when plotting fails.
pub fn plot_line_chart(series: &[ChartSeries], style: &ChartStyle, path: &Path) -> AppResult<()> {
    let (min_y, max_y) = series
        .iter()
        .flat_map(|series| series.points.iter().map(|&(_, y)| y))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), y| {
            (min.min(y), max.max(y))
        });

    let root = BitMapBackend::new(path, (1600, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(style.title.as_str(), ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range(series), padded_range(min_y, max_y))?;

    chart
        .configure_mesh()
        .x_desc("Elapsed Time (seconds)")
        .y_desc(style.unit.as_str())
        .draw()?;

    for (idx, line) in series.iter().enumerate() {
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

    root.present()?;
    Ok(())
}
