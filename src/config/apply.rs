use std::collections::BTreeSet;
use std::num::NonZeroUsize;

use clap::ArgMatches;
use clap::parser::ValueSource;
use tracing::debug;

use crate::args::{PositiveUsize, ReportArgs};
use crate::engine::FamilySpec;
use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ConfigFile, FamilyConfig};
use super::{ChartStyle, FamilyPlan, PRESETS, find_preset};

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<NonZeroUsize> {
    PositiveUsize::try_from(value)
        .map(PositiveUsize::as_non_zero)
        .map_err(|err| {
            AppError::config(ConfigError::FieldMustBePositive {
                field: field.to_owned(),
                source: err,
            })
        })
}

/// Applies top-level configuration values to CLI arguments.
///
/// Values given on the command line win.
pub fn apply_config(args: &mut ReportArgs, matches: &ArgMatches, config: &ConfigFile) {
    if !is_cli(matches, "charts_path")
        && let Some(path) = config.charts_path.clone()
    {
        args.charts_path = path;
    }

    if !is_cli(matches, "no_charts")
        && let Some(no_charts) = config.no_charts
    {
        args.no_charts = no_charts;
    }

    if !is_cli(matches, "export_csv")
        && let Some(path) = config.export_csv.clone()
    {
        args.export_csv = Some(path);
    }

    if !is_cli(matches, "export_json")
        && let Some(path) = config.export_json.clone()
    {
        args.export_json = Some(path);
    }

    if !is_cli(matches, "families")
        && let Some(families) = config.families.clone()
    {
        args.families = families;
    }
}

/// Resolves the families to report.
///
/// Requested names are looked up among config `[[family]]` tables first,
/// then presets. With nothing requested, every known family whose metric
/// occurs in `present_metrics` is reported. Window precedence is
/// `--window`, then the family's own `window`, then the top-level config
/// `window`, then the default.
///
/// # Errors
///
/// Returns an error for an unknown family name, an invalid `[[family]]`
/// table, or when no family is left to report.
pub fn resolve_families(
    args: &ReportArgs,
    config: Option<&ConfigFile>,
    present_metrics: &BTreeSet<String>,
) -> AppResult<Vec<FamilyPlan>> {
    let default_window = match config.and_then(|config| config.window) {
        Some(window) => Some(ensure_positive_usize(window, "window")?),
        None => None,
    };
    let catalog = build_catalog(config, default_window)?;

    let mut selected: Vec<FamilyPlan> = Vec::new();
    if args.families.is_empty() {
        for plan in &catalog {
            if present_metrics.contains(&plan.spec.metric_name) {
                selected.push(plan.clone());
            } else {
                debug!(
                    "Skipping family '{}': metric '{}' not in input",
                    plan.name(),
                    plan.spec.metric_name
                );
            }
        }
    } else {
        for name in &args.families {
            if selected.iter().any(|plan| plan.name() == name) {
                continue;
            }
            let plan = catalog
                .iter()
                .find(|plan| plan.name() == name)
                .ok_or_else(|| {
                    AppError::config(ConfigError::UnknownPreset { name: name.clone() })
                })?;
            selected.push(plan.clone());
        }
    }

    if selected.is_empty() {
        return Err(AppError::config(ConfigError::NoFamilies));
    }

    for plan in &mut selected {
        if let Some(window) = args.window {
            plan.spec.window = window.as_non_zero();
        }
        if let Some(labels) = args.labels.as_ref() {
            plan.spec.labels = labels.as_slice().iter().cloned().collect();
        }
        validate_plan(plan)?;
    }

    Ok(selected)
}

fn build_catalog(
    config: Option<&ConfigFile>,
    default_window: Option<NonZeroUsize>,
) -> AppResult<Vec<FamilyPlan>> {
    let mut catalog: Vec<FamilyPlan> = PRESETS
        .iter()
        .map(|preset| {
            let mut plan = preset.to_plan();
            if let Some(window) = default_window {
                plan.spec.window = window;
            }
            plan
        })
        .collect();

    let Some(config) = config else {
        return Ok(catalog);
    };

    let mut defined: BTreeSet<String> = BTreeSet::new();
    for (position, family) in config.family.iter().enumerate() {
        let plan = resolve_family_config(family, position, default_window)?;
        if !defined.insert(plan.name().to_owned()) {
            return Err(AppError::config(ConfigError::DuplicateFamily {
                name: plan.name().to_owned(),
            }));
        }
        match catalog.iter_mut().find(|existing| existing.name() == plan.name()) {
            Some(existing) => *existing = plan,
            None => catalog.push(plan),
        }
    }

    Ok(catalog)
}

fn resolve_family_config(
    family: &FamilyConfig,
    position: usize,
    default_window: Option<NonZeroUsize>,
) -> AppResult<FamilyPlan> {
    let name = family
        .name
        .clone()
        .or_else(|| family.preset.clone())
        .or_else(|| family.metric.clone())
        .ok_or_else(|| {
            AppError::config(ConfigError::FamilyMissingField {
                name: format!("#{}", position.saturating_add(1)),
                field: "metric",
            })
        })?;

    let mut plan = match family.preset.as_deref() {
        Some(preset) => find_preset(preset)
            .ok_or_else(|| {
                AppError::config(ConfigError::UnknownPreset {
                    name: preset.to_owned(),
                })
            })?
            .to_plan(),
        None => {
            let missing = |field: &'static str| {
                AppError::config(ConfigError::FamilyMissingField {
                    name: name.clone(),
                    field,
                })
            };
            let metric = family.metric.as_deref().ok_or_else(|| missing("metric"))?;
            let labels = family.labels.as_ref().ok_or_else(|| missing("labels"))?;
            let kind = family.kind.ok_or_else(|| missing("kind"))?;
            FamilyPlan {
                spec: FamilySpec::new(metric, labels.iter().cloned(), kind),
                chart: ChartStyle::line(metric),
            }
        }
    };

    plan.spec = plan.spec.with_name(&name);
    if let Some(metric) = family.metric.clone() {
        plan.spec.metric_name = metric;
    }
    if let Some(labels) = family.labels.as_ref() {
        plan.spec.labels = labels.iter().cloned().collect();
    }
    if let Some(kind) = family.kind {
        plan.spec.kind = kind;
    }
    match family.window {
        Some(window) => {
            plan.spec.window = ensure_positive_usize(window, &format!("family.{}.window", name))?;
        }
        None => {
            if let Some(window) = default_window {
                plan.spec.window = window;
            }
        }
    }
    if let Some(aggregation) = family.aggregation {
        plan.spec.aggregation = aggregation;
    }
    if let Some(unit_scale) = family.unit_scale {
        plan.spec.unit_scale = unit_scale;
    }
    if let Some(order) = family.column_order.clone() {
        plan.spec.column_order = Some(order);
    }
    if let Some(policy) = family.order_policy {
        plan.spec.order_policy = policy;
    }
    if let Some(policy) = family.reset_policy {
        plan.spec = plan.spec.with_reset_policy(policy);
    }
    if let Some(fill) = family.leading_fill {
        plan.spec = plan.spec.with_leading_fill(fill);
    }
    if let Some(kind) = family.chart {
        plan.chart.kind = kind;
    }
    if let Some(title) = family.title.clone() {
        plan.chart.title = title;
    }
    if let Some(unit) = family.unit.clone() {
        plan.chart.unit = unit;
    }
    if let Some(group) = family.group.clone() {
        plan.chart.group = Some(group).filter(|group| !group.is_empty());
    }

    Ok(plan)
}

fn validate_plan(plan: &FamilyPlan) -> AppResult<()> {
    if plan.spec.labels.is_empty() {
        return Err(AppError::config(ConfigError::FamilyNoLabels {
            name: plan.name().to_owned(),
        }));
    }
    let scale = plan.spec.unit_scale;
    if !scale.is_finite() || scale == 0.0 {
        return Err(AppError::config(ConfigError::InvalidUnitScale {
            name: plan.name().to_owned(),
            value: scale,
        }));
    }
    Ok(())
}
