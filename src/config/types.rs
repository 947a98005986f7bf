use serde::Deserialize;

use crate::engine::{Aggregation, LeadingFill, MetricKind, OrderPolicy, ResetPolicy};

use super::ChartKind;

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub charts_path: Option<String>,
    pub no_charts: Option<bool>,
    pub export_csv: Option<String>,
    pub export_json: Option<String>,
    /// Window for every family that does not set its own.
    pub window: Option<usize>,
    /// Families to report when none are given on the command line.
    pub families: Option<Vec<String>>,
    #[serde(default, rename = "family")]
    pub family: Vec<FamilyConfig>,
}

/// One `[[family]]` table.
///
/// With `preset`, every other key overrides the preset. Without it,
/// `metric`, `labels`, and `kind` are required.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FamilyConfig {
    pub name: Option<String>,
    pub preset: Option<String>,
    pub metric: Option<String>,
    pub labels: Option<Vec<String>>,
    pub kind: Option<MetricKind>,
    pub window: Option<usize>,
    pub aggregation: Option<Aggregation>,
    pub unit_scale: Option<f64>,
    pub column_order: Option<Vec<String>>,
    pub order_policy: Option<OrderPolicy>,
    pub reset_policy: Option<ResetPolicy>,
    pub leading_fill: Option<LeadingFill>,
    pub chart: Option<ChartKind>,
    pub title: Option<String>,
    pub unit: Option<String>,
    /// Chart group; an empty string draws the family on its own.
    pub group: Option<String>,
}
