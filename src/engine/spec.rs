use std::collections::BTreeSet;
use std::num::NonZeroUsize;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::DeriveOptions;

/// Rows compared against when no window is configured.
pub const DEFAULT_WINDOW: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(window) => window,
    None => NonZeroUsize::MIN,
};

#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Monotonic counter; rates are derived.
    Cumulative,
    /// Direct reading; values pass through scaled.
    Instantaneous,
}

impl MetricKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MetricKind::Cumulative => "cumulative",
            MetricKind::Instantaneous => "instantaneous",
        }
    }
}

/// How duplicate `(timestamp, label)` samples collapse.
#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    Mean,
    Last,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderPolicy {
    /// Unlisted data columns go after the listed ones.
    #[default]
    Append,
    /// Any mismatch between the order and the data is an error.
    Strict,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// A window whose counter went backwards yields no rate.
    #[default]
    Skip,
    /// Keep the negative rate.
    Keep,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LeadingFill {
    #[default]
    Absent,
    Zero,
}

/// Everything the engine needs to turn one metric family into a table.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilySpec {
    /// Output name; defaults to the metric name.
    pub name: String,
    pub metric_name: String,
    /// Explicit allow-list; samples with other labels are excluded.
    pub labels: BTreeSet<String>,
    pub kind: MetricKind,
    pub window: NonZeroUsize,
    pub aggregation: Aggregation,
    /// Multiplier applied after the rate divide (or to raw readings).
    pub unit_scale: f64,
    pub column_order: Option<Vec<String>>,
    pub order_policy: OrderPolicy,
    pub reset_policy: ResetPolicy,
    pub leading_fill: LeadingFill,
}

impl FamilySpec {
    /// Creates a spec with default window, `last` aggregation, and unit scale 1.
    #[must_use]
    pub fn new<I, S>(metric_name: &str, labels: I, kind: MetricKind) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: metric_name.to_owned(),
            metric_name: metric_name.to_owned(),
            labels: labels.into_iter().map(Into::into).collect(),
            kind,
            window: DEFAULT_WINDOW,
            aggregation: Aggregation::Last,
            unit_scale: 1.0,
            column_order: None,
            order_policy: OrderPolicy::default(),
            reset_policy: ResetPolicy::default(),
            leading_fill: LeadingFill::default(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        name.clone_into(&mut self.name);
        self
    }

    #[must_use]
    pub fn with_window(mut self, window: NonZeroUsize) -> Self {
        self.window = window;
        self
    }

    #[must_use]
    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    #[must_use]
    pub fn with_unit_scale(mut self, unit_scale: f64) -> Self {
        self.unit_scale = unit_scale;
        self
    }

    #[must_use]
    pub fn with_column_order<I, S>(mut self, order: I, policy: OrderPolicy) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.column_order = Some(order.into_iter().map(Into::into).collect());
        self.order_policy = policy;
        self
    }

    #[must_use]
    pub fn with_reset_policy(mut self, reset_policy: ResetPolicy) -> Self {
        self.reset_policy = reset_policy;
        self
    }

    #[must_use]
    pub fn with_leading_fill(mut self, leading_fill: LeadingFill) -> Self {
        self.leading_fill = leading_fill;
        self
    }

    #[must_use]
    pub const fn derive_options(&self) -> DeriveOptions {
        DeriveOptions {
            kind: self.kind,
            window: self.window,
            unit_scale: self.unit_scale,
            reset_policy: self.reset_policy,
        }
    }
}
