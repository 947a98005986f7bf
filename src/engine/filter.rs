use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::samples::Sample;

/// A non-empty selection of one metric family, in input order.
#[derive(Debug, Clone)]
pub struct FilteredSamples<'a> {
    metric: String,
    samples: Vec<&'a Sample>,
    ignored_labels: BTreeSet<String>,
}

impl<'a> FilteredSamples<'a> {
    #[must_use]
    pub fn metric(&self) -> &str {
        &self.metric
    }

    #[must_use]
    pub fn samples(&self) -> &[&'a Sample] {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Labels of `metric` that were seen but are not in the allow-list.
    #[must_use]
    pub fn ignored_labels(&self) -> &BTreeSet<String> {
        &self.ignored_labels
    }

    /// Always `false`; an empty selection is an `EmptyInput` error instead.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Selects the samples of `metric_name` whose label is in `labels`.
///
/// # Errors
///
/// Returns [`EngineError::EmptyInput`] when nothing matches, so callers can
/// fail fast instead of rendering a blank table.
pub fn filter_samples<'a>(
    samples: &'a [Sample],
    metric_name: &str,
    labels: &BTreeSet<String>,
) -> EngineResult<FilteredSamples<'a>> {
    let mut named = 0usize;
    let mut ignored_labels: BTreeSet<String> = BTreeSet::new();
    let mut selected: Vec<&Sample> = Vec::new();
    for sample in samples.iter().filter(|sample| sample.metric_name == metric_name) {
        named = named.saturating_add(1);
        if labels.contains(&sample.label) {
            selected.push(sample);
        } else if !ignored_labels.contains(&sample.label) {
            ignored_labels.insert(sample.label.clone());
        }
    }

    debug!(
        "Metric '{}': kept {} of {} samples by label",
        metric_name,
        selected.len(),
        named
    );

    if !ignored_labels.is_empty() {
        let listed: Vec<&str> = ignored_labels.iter().map(String::as_str).collect();
        warn!(
            "Metric '{}': ignored {} samples with labels outside the allow-list: {}",
            metric_name,
            named.saturating_sub(selected.len()),
            listed.join(", ")
        );
    }

    if selected.is_empty() {
        return Err(EngineError::EmptyInput {
            metric: metric_name.to_owned(),
        });
    }

    Ok(FilteredSamples {
        metric: metric_name.to_owned(),
        samples: selected,
        ignored_labels,
    })
}
