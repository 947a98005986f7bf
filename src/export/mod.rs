//! CSV and JSON writers for derived family tables.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::charts::family_file_stem;
use crate::engine::{FamilyOutput, Table};

#[derive(Debug, Serialize)]
struct ExportRow {
    time: String,
    values: Vec<Option<f64>>,
}

#[derive(Debug, Serialize)]
struct ExportTable<'a> {
    family: &'a str,
    metric: &'a str,
    kind: &'static str,
    unit: &'a str,
    columns: &'a [String],
    rows: Vec<ExportRow>,
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

/// Writes `time,<col1>,<col2>,...` with RFC 3339 times and empty absent cells.
///
/// # Errors
///
/// Returns an error when the file cannot be created or written.
pub async fn export_csv(path: &Path, table: &Table) -> Result<(), std::io::Error> {
    let file = tokio::fs::File::create(path).await?;
    let mut writer = BufWriter::new(file);

    let mut header = String::from("time");
    for column in table.columns() {
        header.push(',');
        header.push_str(&csv_field(column));
    }
    header.push('\n');
    writer.write_all(header.as_bytes()).await?;

    for (timestamp, values) in table.rows() {
        let mut line = timestamp.to_rfc3339();
        for value in values {
            line.push(',');
            if let Some(value) = value {
                line.push_str(&value.to_string());
            }
        }
        line.push('\n');
        writer.write_all(line.as_bytes()).await?;
    }
    writer.flush().await?;
    Ok(())
}

/// Writes the family table as one JSON document.
///
/// # Errors
///
/// Returns an error when the file cannot be created or written.
pub async fn export_json(
    path: &Path,
    output: &FamilyOutput,
    unit: &str,
) -> Result<(), std::io::Error> {
    let table = output.derived.table();
    let payload = ExportTable {
        family: &output.name,
        metric: &output.metric_name,
        kind: output.derived.kind().as_str(),
        unit,
        columns: table.columns(),
        rows: table
            .rows()
            .map(|(timestamp, values)| ExportRow {
                time: timestamp.to_rfc3339(),
                values,
            })
            .collect(),
    };

    let file = tokio::fs::File::create(path).await?;
    let mut writer = BufWriter::new(file);
    let json = serde_json::to_vec_pretty(&payload).map_err(std::io::Error::other)?;
    writer.write_all(&json).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

/// Exports one family into whichever of the CSV and JSON directories are set.
///
/// # Errors
///
/// Returns an error when a directory cannot be created or a file cannot be
/// written.
pub async fn export_family(
    output: &FamilyOutput,
    unit: &str,
    csv_dir: Option<&Path>,
    json_dir: Option<&Path>,
) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut written = Vec::new();
    let stem = family_file_stem(&output.name);

    if let Some(dir) = csv_dir {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(format!("{}.csv", stem));
        export_csv(&path, output.derived.table()).await?;
        written.push(path);
    }
    if let Some(dir) = json_dir {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(format!("{}.json", stem));
        export_json(&path, output, unit).await?;
        written.push(path);
    }
    Ok(written)
}
