use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::engine::FamilySpec;

#[derive(Debug, Clone, Copy, Default, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    #[default]
    Line,
    StackedArea,
}

impl ChartKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::StackedArea => "stacked_area",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub kind: ChartKind,
    pub title: String,
    /// Y axis label; also reported in exports.
    pub unit: String,
    /// Families sharing a group are drawn as panels of one `<group>.png`
    /// instead of their own charts.
    pub group: Option<String>,
}

impl ChartStyle {
    #[must_use]
    pub fn line(title: &str) -> Self {
        Self {
            kind: ChartKind::Line,
            title: title.to_owned(),
            unit: String::new(),
            group: None,
        }
    }
}

/// A fully resolved family: engine parameters plus presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyPlan {
    pub spec: FamilySpec,
    pub chart: ChartStyle,
}

impl FamilyPlan {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.spec.name
    }
}
