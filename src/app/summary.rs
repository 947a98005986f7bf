use crate::config::FamilyPlan;
use crate::engine::{FamilyOutput, MetricKind};
use crate::samples::ReadReport;

/// Minimum, mean, and maximum of the present cells of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ColumnStats {
    pub(crate) min: f64,
    pub(crate) mean: f64,
    pub(crate) max: f64,
}

pub(crate) fn column_stats(cells: &[Option<f64>]) -> Option<ColumnStats> {
    let mut count = 0_u32;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in cells.iter().flatten() {
        count = count.saturating_add(1);
        sum += value;
        min = min.min(*value);
        max = max.max(*value);
    }
    if count == 0 {
        return None;
    }
    Some(ColumnStats {
        min,
        mean: sum / f64::from(count),
        max,
    })
}

pub(crate) fn input_summary_lines(report: &ReadReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Input: {} rows, {} samples accepted",
        report.rows, report.accepted
    )];
    if report.unparseable_timestamps > 0 || report.malformed_rows > 0 {
        lines.push(format!(
            "Dropped: {} unparseable times, {} malformed rows",
            report.unparseable_timestamps, report.malformed_rows
        ));
    }
    lines
}

pub(crate) fn summary_lines(output: &FamilyOutput, plan: &FamilyPlan) -> Vec<String> {
    let spec = &plan.spec;
    let table = output.derived.table();
    let mut lines = Vec::new();

    match output.derived.kind() {
        MetricKind::Cumulative => lines.push(format!(
            "== {} ({}, cumulative, window {}) ==",
            output.name,
            output.metric_name,
            spec.window.get()
        )),
        MetricKind::Instantaneous => lines.push(format!(
            "== {} ({}, instantaneous) ==",
            output.name, output.metric_name
        )),
    }
    lines.push(format!(
        "Samples: {} filtered, {} aligned rows, {} output rows",
        output.filtered_samples,
        output.aligned_rows,
        table.row_count()
    ));
    if output.derived.kind() == MetricKind::Cumulative {
        let stats = output.derived.stats();
        lines.push(format!(
            "Dropped rows: {} warm-up, {} degenerate windows, {} incomplete; {} counter resets",
            stats.warmup_rows, stats.degenerate_windows, stats.incomplete_rows, stats.counter_resets
        ));
    }

    if !output.ignored_labels.is_empty() {
        lines.push(format!(
            "Ignored labels: {} (not in the allow-list; widen it with --labels)",
            output.ignored_labels.join(", ")
        ));
    }

    if plan.chart.unit.is_empty() {
        lines.push("Columns:".to_owned());
    } else {
        lines.push(format!("Columns ({}):", plan.chart.unit));
    }
    for (name, cells) in table.columns().iter().zip(table.column_cells()) {
        match column_stats(cells) {
            Some(stats) => lines.push(format!(
                "  {}: min {:.3} / mean {:.3} / max {:.3}",
                name, stats.min, stats.mean, stats.max
            )),
            None => lines.push(format!("  {}: no values", name)),
        }
    }
    lines
}

pub(crate) fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
