use std::path::Path;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::error::InputError;

use super::{Sample, Timestamp, parse_timestamp};

/// Row accounting for one read of the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadReport {
    /// Data rows seen, excluding the header and blank lines.
    pub rows: usize,
    pub accepted: usize,
    pub unparseable_timestamps: usize,
    pub malformed_rows: usize,
}

#[derive(Debug, Default)]
pub struct SampleSet {
    pub samples: Vec<Sample>,
    pub report: ReadReport,
}

#[derive(Debug, Clone, Copy)]
struct HeaderLayout {
    time: usize,
    name: usize,
    label: Option<usize>,
    value: usize,
}

impl HeaderLayout {
    fn from_header(fields: &[String]) -> Result<Self, InputError> {
        let position = |column: &str| {
            fields
                .iter()
                .position(|field| field.trim().eq_ignore_ascii_case(column))
        };
        let time = position("time").ok_or(InputError::MissingColumn { column: "time" })?;
        let name = position("name").ok_or(InputError::MissingColumn { column: "name" })?;
        let value = position("value").ok_or(InputError::MissingColumn { column: "value" })?;
        Ok(Self {
            time,
            name,
            label: position("label"),
            value,
        })
    }
}

enum RowOutcome {
    Sample(Sample),
    UnparseableTime,
    Malformed,
}

fn parse_row(layout: HeaderLayout, fields: &[String]) -> RowOutcome {
    let Some(name) = fields.get(layout.name).map(|field| field.trim()) else {
        return RowOutcome::Malformed;
    };
    if name.is_empty() {
        return RowOutcome::Malformed;
    }
    let label = match layout.label {
        Some(index) => match fields.get(index) {
            Some(field) => field.trim(),
            None => return RowOutcome::Malformed,
        },
        None => "",
    };
    let timestamp: Timestamp = match fields.get(layout.time) {
        Some(raw) => match parse_timestamp(raw) {
            Some(timestamp) => timestamp,
            None => return RowOutcome::UnparseableTime,
        },
        None => return RowOutcome::Malformed,
    };
    let value = match fields
        .get(layout.value)
        .and_then(|field| field.trim().parse::<f64>().ok())
    {
        Some(value) if value.is_finite() => value,
        Some(_) | None => return RowOutcome::Malformed,
    };
    RowOutcome::Sample(Sample::new(name, label, timestamp, value))
}

/// Splits one CSV line, honoring double quotes and `""` escapes.
pub(super) fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    fields.push(current);
    fields
}

#[derive(Default)]
struct SampleCollector {
    layout: Option<HeaderLayout>,
    set: SampleSet,
    line_no: usize,
}

impl SampleCollector {
    fn push_line(&mut self, line: &str) -> Result<(), InputError> {
        self.line_no = self.line_no.saturating_add(1);
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.trim().is_empty() {
            return Ok(());
        }
        let fields = split_fields(trimmed);

        let Some(layout) = self.layout else {
            self.layout = Some(HeaderLayout::from_header(&fields)?);
            return Ok(());
        };

        let report = &mut self.set.report;
        report.rows = report.rows.saturating_add(1);
        match parse_row(layout, &fields) {
            RowOutcome::Sample(sample) => {
                report.accepted = report.accepted.saturating_add(1);
                self.set.samples.push(sample);
            }
            RowOutcome::UnparseableTime => {
                report.unparseable_timestamps = report.unparseable_timestamps.saturating_add(1);
                debug!("Line {}: unparseable time, row dropped", self.line_no);
            }
            RowOutcome::Malformed => {
                report.malformed_rows = report.malformed_rows.saturating_add(1);
                debug!("Line {}: malformed row dropped", self.line_no);
            }
        }
        Ok(())
    }

    /// Like [`push_line`](Self::push_line) for raw bytes. A data row that
    /// is not valid UTF-8 is counted as malformed; a header is decoded lossily.
    fn push_bytes(&mut self, bytes: &[u8]) -> Result<(), InputError> {
        match std::str::from_utf8(bytes) {
            Ok(line) => self.push_line(line),
            Err(_) if self.layout.is_none() => self.push_line(&String::from_utf8_lossy(bytes)),
            Err(err) => {
                self.line_no = self.line_no.saturating_add(1);
                let report = &mut self.set.report;
                report.rows = report.rows.saturating_add(1);
                report.malformed_rows = report.malformed_rows.saturating_add(1);
                debug!(
                    "Line {}: invalid UTF-8 at byte {}, row dropped",
                    self.line_no,
                    err.valid_up_to()
                );
                Ok(())
            }
        }
    }

    fn finish(self) -> Result<SampleSet, InputError> {
        if self.layout.is_none() {
            return Err(InputError::MissingHeader);
        }
        let report = self.set.report;
        if report.unparseable_timestamps > 0 {
            warn!(
                "Dropped {} rows with unparseable time values",
                report.unparseable_timestamps
            );
        }
        if report.malformed_rows > 0 {
            warn!("Dropped {} malformed rows", report.malformed_rows);
        }
        Ok(self.set)
    }
}

/// Parses samples from CSV text with a `time,name,label,value` header.
///
/// # Errors
///
/// Returns an error when the header is missing or lacks a required column.
pub fn parse_samples(content: &str) -> Result<SampleSet, InputError> {
    let mut collector = SampleCollector::default();
    for line in content.lines() {
        collector.push_line(line)?;
    }
    collector.finish()
}

/// Reads samples from a CSV file.
///
/// Rows that are not valid UTF-8 are dropped and counted as malformed.
///
/// # Errors
///
/// Returns an error when the file cannot be read, or when the header is
/// missing or lacks a required column.
pub async fn read_samples_file(path: &Path) -> Result<SampleSet, InputError> {
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|err| InputError::Io {
            context: "open samples file",
            path: path.to_path_buf(),
            source: err,
        })?;
    let mut reader = BufReader::new(file);
    let mut line: Vec<u8> = Vec::new();
    let mut collector = SampleCollector::default();

    loop {
        line.clear();
        let bytes = reader
            .read_until(b'\n', &mut line)
            .await
            .map_err(|err| InputError::Io {
                context: "read samples file",
                path: path.to_path_buf(),
                source: err,
            })?;
        if bytes == 0 {
            break;
        }
        collector.push_bytes(&line)?;
    }

    collector.finish()
}
