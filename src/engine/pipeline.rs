use tracing::debug;

use crate::error::EngineResult;
use crate::samples::Sample;

use super::{
    AlignedTable, DerivedTable, FamilySpec, align, apply_column_order, derive, filter_samples,
};

/// One family's derived table plus the counts behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyOutput {
    pub name: String,
    pub metric_name: String,
    pub derived: DerivedTable,
    pub filtered_samples: usize,
    pub aligned_rows: usize,
    /// Labels of the metric that the allow-list excluded.
    pub ignored_labels: Vec<String>,
}

/// Filters, aligns, orders, and derives one metric family.
///
/// # Errors
///
/// Returns an error when no sample matches the family, or when the
/// canonical column order conflicts with the data under the strict policy.
pub fn process_family(samples: &[Sample], spec: &FamilySpec) -> EngineResult<FamilyOutput> {
    let filtered = filter_samples(samples, &spec.metric_name, &spec.labels)?;
    let mut aligned = align(&filtered, spec.aggregation, spec.leading_fill);
    if let Some(order) = spec.column_order.as_deref() {
        let ordered =
            apply_column_order(aligned.into_table(), order, spec.order_policy, &spec.metric_name)?;
        aligned = AlignedTable::new(ordered);
    }
    let aligned_rows = aligned.row_count();
    let derived = derive(aligned, &spec.derive_options());

    let stats = derived.stats();
    debug!(
        "Family '{}': {} samples, {} aligned rows, {} output rows ({} warm-up, {} degenerate, {} resets, {} incomplete)",
        spec.name,
        filtered.len(),
        aligned_rows,
        derived.table().row_count(),
        stats.warmup_rows,
        stats.degenerate_windows,
        stats.counter_resets,
        stats.incomplete_rows
    );

    Ok(FamilyOutput {
        name: spec.name.clone(),
        metric_name: spec.metric_name.clone(),
        derived,
        filtered_samples: filtered.len(),
        aligned_rows,
        ignored_labels: filtered.ignored_labels().iter().cloned().collect(),
    })
}
