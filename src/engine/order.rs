use tracing::debug;

use crate::error::{EngineError, EngineResult, OrderMismatch};

use super::{OrderPolicy, Table};

/// Permutes columns into `canonical` order without dropping any column.
///
/// Under [`OrderPolicy::Append`], listed labels that exist come first,
/// unlisted columns follow in their current order, and listed labels that
/// never appear are skipped. Under [`OrderPolicy::Strict`], either kind of
/// mismatch is an error.
///
/// # Errors
///
/// Returns [`EngineError::UnknownColumnInCanonicalOrder`] on a mismatch
/// under the strict policy.
pub fn apply_column_order(
    table: Table,
    canonical: &[String],
    policy: OrderPolicy,
    metric: &str,
) -> EngineResult<Table> {
    let mut placed = vec![false; table.column_count()];
    let mut positions = Vec::with_capacity(table.column_count());

    for label in canonical {
        let Some(position) = table.columns().iter().position(|column| column == label) else {
            match policy {
                OrderPolicy::Append => {
                    debug!(
                        "Canonical label '{}' never seen in '{}'; skipped",
                        label, metric
                    );
                    continue;
                }
                OrderPolicy::Strict => {
                    return Err(EngineError::UnknownColumnInCanonicalOrder {
                        metric: metric.to_owned(),
                        label: label.clone(),
                        direction: OrderMismatch::MissingFromData,
                    });
                }
            }
        };
        if let Some(slot) = placed.get_mut(position)
            && !*slot
        {
            *slot = true;
            positions.push(position);
        }
    }

    for (position, was_placed) in placed.iter().enumerate() {
        if *was_placed {
            continue;
        }
        if policy == OrderPolicy::Strict {
            let label = table.columns().get(position).cloned().unwrap_or_default();
            return Err(EngineError::UnknownColumnInCanonicalOrder {
                metric: metric.to_owned(),
                label,
                direction: OrderMismatch::UnlistedInOrder,
            });
        }
        positions.push(position);
    }

    Ok(table.select_columns(&positions))
}
