use std::future::Future;

use tempfile::tempdir;

use super::area::StackedBands;
use super::panels::panel_series;
use super::{Panel, chart_file_name, plot_family, plot_group, table_series};
use crate::config::{ChartKind, ChartStyle};
use crate::engine::Table;
use crate::error::{AppError, AppResult};
use crate::samples::Timestamp;

fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
    runtime.block_on(future)
}

fn cpu_table() -> AppResult<Table> {
    let index = (10..20).map(Timestamp::from_secs).collect();
    let user = (0..10).map(|i| Some(20.0 + f64::from(i))).collect();
    let system = (0..10).map(|_| Some(5.0)).collect();
    let idle = (0..10).map(|i| Some(75.0 - f64::from(i))).collect();
    Ok(Table::from_columns(
        index,
        vec!["user".to_owned(), "system".to_owned(), "idle".to_owned()],
        vec![user, system, idle],
    )?)
}

fn style(kind: ChartKind) -> ChartStyle {
    ChartStyle {
        kind,
        title: "CPU Usage".to_owned(),
        unit: "CPU Usage (%)".to_owned(),
        group: None,
    }
}

#[test]
fn table_series_uses_seconds_since_first_row() -> AppResult<()> {
    let table = Table::from_columns(
        vec![Timestamp::from_secs(100), Timestamp::from_secs(102)],
        vec!["rx".to_owned()],
        vec![vec![None, Some(3.0)]],
    )?;
    let series = table_series(&table);
    let rx = series
        .first()
        .ok_or_else(|| AppError::validation("Missing series"))?;
    if rx.name != "rx" || rx.points != [(2.0, 3.0)] {
        return Err(AppError::validation(format!("Unexpected series: {:?}", rx)));
    }
    Ok(())
}

#[test]
fn chart_file_name_sanitizes_family() -> AppResult<()> {
    let cases = [
        ("cpu_all", "cpu_all.png"),
        ("net rx/tx", "net-rx-tx.png"),
        ("..", "family.png"),
    ];
    for (family, expected) in cases {
        let name = chart_file_name(family);
        if name != expected {
            return Err(AppError::validation(format!(
                "Unexpected file name for '{}': {}",
                family, name
            )));
        }
    }
    Ok(())
}

#[test]
fn plot_family_writes_line_and_stacked_charts() -> AppResult<()> {
    run_async_test(async {
        let dir = tempdir()?;
        let charts_dir = dir.path().join("charts");
        let table = cpu_table()?;

        for (family, kind) in [
            ("cpu_line", ChartKind::Line),
            ("cpu_all", ChartKind::StackedArea),
        ] {
            let written = plot_family(family, &table, &style(kind), &charts_dir)
                .await?
                .ok_or_else(|| AppError::validation("Expected a chart path"))?;
            if written != charts_dir.join(format!("{}.png", family)) {
                return Err(AppError::validation(format!(
                    "Unexpected chart path: {}",
                    written.display()
                )));
            }
            let metadata = std::fs::metadata(&written)?;
            if metadata.len() == 0 {
                return Err(AppError::validation("Chart file is empty"));
            }
        }
        Ok(())
    })
}

#[test]
fn plot_family_skips_empty_table() -> AppResult<()> {
    run_async_test(async {
        let dir = tempdir()?;
        let table = Table::from_columns(Vec::new(), vec!["user".to_owned()], vec![Vec::new()])?;
        let written = plot_family("cpu_all", &table, &style(ChartKind::Line), dir.path()).await?;
        if written.is_some() {
            return Err(AppError::validation("Expected no chart for an empty table"));
        }
        Ok(())
    })
}

#[test]
fn stacked_bands_accumulate_by_row() -> AppResult<()> {
    let table = Table::from_columns(
        vec![
            Timestamp::from_secs(5),
            Timestamp::from_secs(6),
            Timestamp::from_secs(8),
        ],
        vec!["user".to_owned(), "system".to_owned()],
        vec![
            vec![Some(1.0), Some(2.0), Some(3.0)],
            vec![Some(10.0), None, Some(30.0)],
        ],
    )?;
    let bands = StackedBands::from_table(&table);
    let expected = StackedBands {
        xs: vec![0.0, 1.0, 3.0],
        edges: vec![
            vec![0.0, 0.0, 0.0],
            vec![1.0, 2.0, 3.0],
            vec![11.0, 2.0, 33.0],
        ],
    };
    if bands != expected {
        return Err(AppError::validation(format!("Unexpected bands: {:?}", bands)));
    }
    Ok(())
}

#[test]
fn stacked_bands_handle_long_tables() -> AppResult<()> {
    let rows = 50_000_i64;
    let index = (0..rows).map(Timestamp::from_secs).collect();
    let names: Vec<String> = (0..8).map(|column| format!("state{}", column)).collect();
    let cells = names
        .iter()
        .map(|_| (0..rows).map(|_| Some(1.0)).collect())
        .collect();
    let table = Table::from_columns(index, names, cells)?;

    let bands = StackedBands::from_table(&table);
    let top = bands
        .edges
        .last()
        .ok_or_else(|| AppError::validation("Missing top edge"))?;
    if bands.edges.len() != 9 || top.len() != 50_000 || top.iter().any(|&y| y != 8.0) {
        return Err(AppError::validation("Unexpected bands for a long table"));
    }
    Ok(())
}

#[test]
fn stacked_range_keeps_negative_rates_visible() -> AppResult<()> {
    let table = Table::from_columns(
        vec![Timestamp::from_secs(0), Timestamp::from_secs(1)],
        vec!["user".to_owned(), "system".to_owned()],
        vec![vec![Some(4.0), Some(-6.0)], vec![Some(2.0), Some(1.0)]],
    )?;
    let range = StackedBands::from_table(&table).y_range();
    if range.start >= -6.0 || range.end <= 6.0 {
        return Err(AppError::validation(format!("Unexpected range: {:?}", range)));
    }

    let positive = cpu_table()?;
    let range = StackedBands::from_table(&positive).y_range();
    if range.start != 0.0 {
        return Err(AppError::validation(format!(
            "Expected a zero floor, got {:?}",
            range
        )));
    }
    Ok(())
}

#[test]
fn plot_family_draws_stacked_chart_with_negative_band() -> AppResult<()> {
    run_async_test(async {
        let dir = tempdir()?;
        let table = Table::from_columns(
            vec![Timestamp::from_secs(0), Timestamp::from_secs(1)],
            vec!["user".to_owned()],
            vec![vec![Some(4.0), Some(-6.0)]],
        )?;
        let written = plot_family("cpu_all", &table, &style(ChartKind::StackedArea), dir.path())
            .await?
            .ok_or_else(|| AppError::validation("Expected a chart path"))?;
        if std::fs::metadata(&written)?.len() == 0 {
            return Err(AppError::validation("Chart file is empty"));
        }
        Ok(())
    })
}

fn network_table(start: i64, rows: i64) -> AppResult<Table> {
    let index = (start..start.saturating_add(rows)).map(Timestamp::from_secs).collect();
    let eth0 = (0..rows).map(|i| Some(2.0 + i as f64)).collect();
    Ok(Table::from_columns(index, vec!["eth0".to_owned()], vec![eth0])?)
}

fn network_style(title: &str) -> ChartStyle {
    ChartStyle {
        kind: ChartKind::Line,
        title: title.to_owned(),
        unit: "MB/s".to_owned(),
        group: Some("network".to_owned()),
    }
}

#[test]
fn panel_series_share_the_earliest_origin() -> AppResult<()> {
    let rx = network_table(100, 3)?;
    let tx = network_table(102, 2)?;
    let rx_style = network_style("Network RX");
    let tx_style = network_style("Network TX");
    let panels = [
        Panel {
            name: "network_rx",
            table: &rx,
            style: &rx_style,
        },
        Panel {
            name: "network_tx",
            table: &tx,
            style: &tx_style,
        },
    ];
    let series = panel_series(&panels);
    let tx_points = series
        .get(1)
        .and_then(|lines| lines.first())
        .map(|line| line.points.clone())
        .ok_or_else(|| AppError::validation("Missing tx series"))?;
    if tx_points != [(2.0, 2.0), (3.0, 3.0)] {
        return Err(AppError::validation(format!("Unexpected tx points: {:?}", tx_points)));
    }
    Ok(())
}

#[test]
fn plot_group_writes_one_chart_for_all_panels() -> AppResult<()> {
    run_async_test(async {
        let dir = tempdir()?;
        let rx = network_table(0, 10)?;
        let tx = network_table(0, 10)?;
        let empty = Table::from_columns(Vec::new(), vec!["eth0".to_owned()], vec![Vec::new()])?;
        let rx_style = network_style("Network RX");
        let tx_style = network_style("Network TX");
        let panels = [
            Panel {
                name: "network_rx",
                table: &rx,
                style: &rx_style,
            },
            Panel {
                name: "network_tx",
                table: &tx,
                style: &tx_style,
            },
        ];
        let written = plot_group("network", &panels, dir.path())
            .await?
            .ok_or_else(|| AppError::validation("Expected a chart path"))?;
        if written != dir.path().join("network.png") || std::fs::metadata(&written)?.len() == 0 {
            return Err(AppError::validation(format!(
                "Unexpected chart: {}",
                written.display()
            )));
        }

        let only_empty = [Panel {
            name: "network_rx",
            table: &empty,
            style: &rx_style,
        }];
        if plot_group("idle", &only_empty, dir.path()).await?.is_some() {
            return Err(AppError::validation("Expected no chart for empty panels"));
        }
        Ok(())
    })
}
