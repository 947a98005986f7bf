use std::ops::Deref;

use crate::error::{EngineError, EngineResult};
use crate::samples::{Sample, Timestamp};

use super::{DeriveStats, MetricKind};

/// A column-major table: one timestamp per row, one label per column.
///
/// `None` cells are absent values.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    index: Vec<Timestamp>,
    columns: Vec<String>,
    cells: Vec<Vec<Option<f64>>>,
}

impl Table {
    /// Builds a table from raw parts, checking only that the shapes agree.
    ///
    /// # Errors
    ///
    /// Returns an error when the number of column names and cell columns
    /// differ, or when a cell column's length differs from the index.
    pub fn from_columns(
        index: Vec<Timestamp>,
        columns: Vec<String>,
        cells: Vec<Vec<Option<f64>>>,
    ) -> EngineResult<Self> {
        if columns.len() != cells.len() {
            return Err(EngineError::ShapeMismatch {
                columns: columns.len(),
                cells: cells.len(),
            });
        }
        for (name, column) in columns.iter().zip(&cells) {
            if column.len() != index.len() {
                return Err(EngineError::ColumnLengthMismatch {
                    column: name.clone(),
                    len: column.len(),
                    rows: index.len(),
                });
            }
        }
        Ok(Self {
            index,
            columns,
            cells,
        })
    }

    pub(super) const fn from_parts(
        index: Vec<Timestamp>,
        columns: Vec<String>,
        cells: Vec<Vec<Option<f64>>>,
    ) -> Self {
        Self {
            index,
            columns,
            cells,
        }
    }

    #[must_use]
    pub fn index(&self) -> &[Timestamp] {
        &self.index
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        let position = self.columns.iter().position(|column| column == name)?;
        self.column_at(position)
    }

    #[must_use]
    pub fn column_at(&self, position: usize) -> Option<&[Option<f64>]> {
        self.cells.get(position).map(Vec::as_slice)
    }

    /// Cells of every column, in column order.
    pub fn column_cells(&self) -> impl Iterator<Item = &[Option<f64>]> {
        self.cells.iter().map(Vec::as_slice)
    }

    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<f64> {
        self.column(column)
            .and_then(|cells| cells.get(row).copied())
            .flatten()
    }

    #[must_use]
    pub fn row(&self, row: usize) -> Option<(Timestamp, Vec<Option<f64>>)> {
        let timestamp = *self.index.get(row)?;
        let values = self
            .cells
            .iter()
            .map(|column| column.get(row).copied().flatten())
            .collect();
        Some((timestamp, values))
    }

    /// Rows in index order as `(timestamp, values)` pairs.
    pub fn rows(&self) -> impl Iterator<Item = (Timestamp, Vec<Option<f64>>)> + '_ {
        (0..self.row_count()).filter_map(|row| self.row(row))
    }

    /// Keeps only the columns at `positions`, in that order.
    pub(super) fn select_columns(self, positions: &[usize]) -> Self {
        let Self {
            index,
            columns,
            cells,
        } = self;
        let mut columns: Vec<Option<String>> = columns.into_iter().map(Some).collect();
        let mut cells: Vec<Option<Vec<Option<f64>>>> = cells.into_iter().map(Some).collect();
        let mut picked_columns = Vec::with_capacity(positions.len());
        let mut picked_cells = Vec::with_capacity(positions.len());
        for &position in positions {
            let name = columns.get_mut(position).and_then(Option::take);
            let column = cells.get_mut(position).and_then(Option::take);
            if let (Some(name), Some(column)) = (name, column) {
                picked_columns.push(name);
                picked_cells.push(column);
            }
        }
        Self::from_parts(index, picked_columns, picked_cells)
    }

    /// Applies `f` to every present cell.
    pub(super) fn map_present<F>(mut self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        for column in &mut self.cells {
            for cell in column.iter_mut().flatten() {
                *cell = f(*cell);
            }
        }
        self
    }
}

/// A table with a strictly increasing index, one column per label, and no
/// absent cell after a column's first observation.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedTable(Table);

impl AlignedTable {
    pub(super) const fn new(table: Table) -> Self {
        Self(table)
    }

    #[must_use]
    pub const fn table(&self) -> &Table {
        &self.0
    }

    #[must_use]
    pub fn into_table(self) -> Table {
        self.0
    }

    /// Flattens every present cell back into samples of `metric_name`.
    #[must_use]
    pub fn to_samples(&self, metric_name: &str) -> Vec<Sample> {
        let table = &self.0;
        let mut samples = Vec::new();
        for (label, column) in table.columns.iter().zip(&table.cells) {
            for (timestamp, cell) in table.index.iter().zip(column) {
                if let Some(value) = cell {
                    samples.push(Sample::new(metric_name, label.as_str(), *timestamp, *value));
                }
            }
        }
        samples
    }
}

impl Deref for AlignedTable {
    type Target = Table;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Per-second rates derived from a cumulative counter table.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    table: Table,
    stats: DeriveStats,
}

impl RateTable {
    pub(super) const fn new(table: Table, stats: DeriveStats) -> Self {
        Self { table, stats }
    }

    #[must_use]
    pub const fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub const fn stats(&self) -> DeriveStats {
        self.stats
    }

    #[must_use]
    pub fn into_table(self) -> Table {
        self.table
    }
}

impl Deref for RateTable {
    type Target = Table;

    fn deref(&self) -> &Self::Target {
        &self.table
    }
}

/// Output of the rate deriver for either metric kind.
#[derive(Debug, Clone, PartialEq)]
pub enum DerivedTable {
    Rates(RateTable),
    Measures(AlignedTable),
}

impl DerivedTable {
    #[must_use]
    pub const fn kind(&self) -> MetricKind {
        match self {
            DerivedTable::Rates(_) => MetricKind::Cumulative,
            DerivedTable::Measures(_) => MetricKind::Instantaneous,
        }
    }

    #[must_use]
    pub const fn table(&self) -> &Table {
        match self {
            DerivedTable::Rates(rates) => rates.table(),
            DerivedTable::Measures(measures) => measures.table(),
        }
    }

    #[must_use]
    pub fn stats(&self) -> DeriveStats {
        match self {
            DerivedTable::Rates(rates) => rates.stats(),
            DerivedTable::Measures(_) => DeriveStats::default(),
        }
    }

    #[must_use]
    pub fn into_table(self) -> Table {
        match self {
            DerivedTable::Rates(rates) => rates.into_table(),
            DerivedTable::Measures(measures) => measures.into_table(),
        }
    }
}
