use std::collections::{BTreeMap, BTreeSet};

use crate::samples::Timestamp;

use super::{Aggregation, AlignedTable, FilteredSamples, LeadingFill, Table};

#[derive(Debug, Clone, Copy)]
enum Reducer {
    Mean { sum: f64, count: u32 },
    Last(f64),
}

impl Reducer {
    const fn start(aggregation: Aggregation, value: f64) -> Self {
        match aggregation {
            Aggregation::Mean => Reducer::Mean {
                sum: value,
                count: 1,
            },
            Aggregation::Last => Reducer::Last(value),
        }
    }

    fn push(&mut self, value: f64) {
        match self {
            Reducer::Mean { sum, count } => {
                *sum += value;
                *count = count.saturating_add(1);
            }
            Reducer::Last(last) => *last = value,
        }
    }

    fn value(self) -> f64 {
        match self {
            Reducer::Mean { sum, count } => sum / f64::from(count.max(1)),
            Reducer::Last(last) => last,
        }
    }
}

/// Reshapes a family into a dense table.
///
/// Duplicate `(timestamp, label)` samples collapse with `aggregation`; the
/// index holds each distinct timestamp once, ascending; columns are the
/// labels in lexicographic order. A label's latest value is carried into
/// rows where it was not sampled. Rows before its first observation stay
/// absent, or zero under [`LeadingFill::Zero`].
#[must_use]
pub fn align(
    filtered: &FilteredSamples<'_>,
    aggregation: Aggregation,
    leading_fill: LeadingFill,
) -> AlignedTable {
    let mut grid: BTreeMap<Timestamp, BTreeMap<&str, Reducer>> = BTreeMap::new();
    let mut labels: BTreeSet<&str> = BTreeSet::new();

    for sample in filtered.samples() {
        labels.insert(sample.label.as_str());
        grid.entry(sample.timestamp)
            .or_default()
            .entry(sample.label.as_str())
            .and_modify(|reducer| reducer.push(sample.value))
            .or_insert_with(|| Reducer::start(aggregation, sample.value));
    }

    let leading = match leading_fill {
        LeadingFill::Absent => None,
        LeadingFill::Zero => Some(0.0),
    };

    let mut cells = Vec::with_capacity(labels.len());
    for label in &labels {
        let mut carried = leading;
        let column: Vec<Option<f64>> = grid
            .values()
            .map(|row| {
                if let Some(reducer) = row.get(label) {
                    carried = Some(reducer.value());
                }
                carried
            })
            .collect();
        cells.push(column);
    }

    let index = grid.keys().copied().collect();
    let columns = labels.into_iter().map(str::to_owned).collect();
    AlignedTable::new(Table::from_parts(index, columns, cells))
}
