use crate::engine::{Aggregation, FamilySpec, MetricKind, OrderPolicy};

use super::{ChartKind, ChartStyle, FamilyPlan};

const CPU_STATES: &[&str] = &[
    "user", "system", "idle", "iowait", "irq", "nice", "softirq", "steal",
];
const BACKEND_OPERATIONS: &[&str] = &["get", "put", "close"];
const NETWORK_INTERFACES: &[&str] = &["eth0", "lo"];
const MEMORY_FIELDS: &[&str] = &[
    "total",
    "free",
    "buffers",
    "cached",
    "slab",
    "swap_total",
    "swap_free",
    "swap_cached",
];

/// A built-in family definition.
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub name: &'static str,
    pub metric: &'static str,
    pub labels: &'static [&'static str],
    pub kind: MetricKind,
    pub aggregation: Aggregation,
    pub unit_scale: f64,
    pub column_order: Option<&'static [&'static str]>,
    pub chart: ChartKind,
    pub title: &'static str,
    pub unit: &'static str,
    pub group: Option<&'static str>,
}

impl Preset {
    #[must_use]
    pub fn to_plan(&self) -> FamilyPlan {
        let mut spec = FamilySpec::new(self.metric, self.labels.iter().copied(), self.kind)
            .with_name(self.name)
            .with_aggregation(self.aggregation)
            .with_unit_scale(self.unit_scale);
        if let Some(order) = self.column_order {
            spec = spec.with_column_order(order.iter().copied(), OrderPolicy::Append);
        }
        FamilyPlan {
            spec,
            chart: ChartStyle {
                kind: self.chart,
                title: self.title.to_owned(),
                unit: self.unit.to_owned(),
                group: self.group.map(str::to_owned),
            },
        }
    }
}

pub const PRESETS: [Preset; 8] = [
    Preset {
        name: "cpu_all",
        metric: "cpu_all",
        labels: CPU_STATES,
        kind: MetricKind::Cumulative,
        aggregation: Aggregation::Mean,
        unit_scale: 100.0,
        column_order: Some(CPU_STATES),
        chart: ChartKind::StackedArea,
        title: "CPU Usage (cpu_all)",
        unit: "CPU Usage (%)",
        group: None,
    },
    Preset {
        name: "cpu_self",
        metric: "cpu_self",
        labels: &["total"],
        kind: MetricKind::Cumulative,
        aggregation: Aggregation::Last,
        unit_scale: 1.0,
        column_order: None,
        chart: ChartKind::Line,
        title: "Process CPU Usage Rate",
        unit: "CPU seconds per second",
        group: None,
    },
    Preset {
        name: "network_rx",
        metric: "network_rx",
        labels: NETWORK_INTERFACES,
        kind: MetricKind::Cumulative,
        aggregation: Aggregation::Last,
        unit_scale: 1e-6,
        column_order: None,
        chart: ChartKind::Line,
        title: "Network RX",
        unit: "MB/s",
        group: Some("network"),
    },
    Preset {
        name: "network_tx",
        metric: "network_tx",
        labels: NETWORK_INTERFACES,
        kind: MetricKind::Cumulative,
        aggregation: Aggregation::Last,
        unit_scale: 1e-6,
        column_order: None,
        chart: ChartKind::Line,
        title: "Network TX",
        unit: "MB/s",
        group: Some("network"),
    },
    Preset {
        name: "backend_duration",
        metric: "backend_duration",
        labels: BACKEND_OPERATIONS,
        kind: MetricKind::Instantaneous,
        aggregation: Aggregation::Mean,
        unit_scale: 1e-9,
        column_order: None,
        chart: ChartKind::Line,
        title: "Backend Operation Duration",
        unit: "Duration (seconds)",
        group: None,
    },
    Preset {
        name: "mem_all",
        metric: "mem_all",
        labels: MEMORY_FIELDS,
        kind: MetricKind::Instantaneous,
        aggregation: Aggregation::Last,
        unit_scale: 1.0 / 1024.0,
        column_order: None,
        chart: ChartKind::Line,
        title: "System Memory",
        unit: "MiB",
        group: None,
    },
    Preset {
        name: "mem_self",
        metric: "mem_self",
        labels: &["resident", "virtual"],
        kind: MetricKind::Instantaneous,
        aggregation: Aggregation::Last,
        unit_scale: 1e-6,
        column_order: None,
        chart: ChartKind::Line,
        title: "Process Memory",
        unit: "MB",
        group: None,
    },
    Preset {
        name: "backend_request",
        metric: "backend_request",
        labels: BACKEND_OPERATIONS,
        kind: MetricKind::Instantaneous,
        aggregation: Aggregation::Last,
        unit_scale: 1.0,
        column_order: None,
        chart: ChartKind::Line,
        title: "Backend Requests In Flight",
        unit: "requests",
        group: None,
    },
];

#[must_use]
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| preset.name == name)
}
