use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::ArgMatches;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::args::ReportArgs;
use crate::charts::{Panel, plot_family, plot_group};
use crate::config::{FamilyPlan, apply_config, load_config, resolve_families};
use crate::engine::{FamilyOutput, process_family};
use crate::error::{AppError, AppResult, EngineResult, ValidationError};
use crate::export::export_family;
use crate::samples::{Sample, read_samples_file};

use super::summary::{input_summary_lines, print_lines, summary_lines};

/// Where rendered output goes; `None` disables that output.
#[derive(Debug, Clone, Default)]
pub(crate) struct OutputSettings {
    pub(crate) charts_dir: Option<PathBuf>,
    pub(crate) export_csv: Option<PathBuf>,
    pub(crate) export_json: Option<PathBuf>,
}

impl OutputSettings {
    pub(crate) fn from_args(args: &ReportArgs) -> Self {
        Self {
            charts_dir: (!args.no_charts).then(|| PathBuf::from(&args.charts_path)),
            export_csv: args.export_csv.as_ref().map(PathBuf::from),
            export_json: args.export_json.as_ref().map(PathBuf::from),
        }
    }
}

/// Reads the input, derives every selected family, and renders the results.
///
/// A failing family does not stop the others; the first failure is returned
/// once every family has been handled.
pub(crate) async fn run_report(mut args: ReportArgs, matches: &ArgMatches) -> AppResult<()> {
    let config = load_config(args.config.as_deref())?;
    if let Some(config) = config.as_ref() {
        apply_config(&mut args, matches, config);
    }

    let input = args
        .input
        .clone()
        .ok_or_else(|| AppError::validation(ValidationError::MissingInput))?;
    let set = read_samples_file(&input).await?;
    info!(
        "Read {} samples from '{}'",
        set.report.accepted,
        input.display()
    );
    print_lines(&input_summary_lines(&set.report));

    let present: BTreeSet<String> = set
        .samples
        .iter()
        .map(|sample| sample.metric_name.clone())
        .collect();
    let plans = resolve_families(&args, config.as_ref(), &present)?;
    let settings = OutputSettings::from_args(&args);

    let samples: Arc<[Sample]> = set.samples.into();
    let results = derive_families(samples, &plans).await?;

    let mut first_error: Option<AppError> = None;
    let mut grouped: Vec<(&FamilyPlan, FamilyOutput)> = Vec::new();
    for (plan, result) in plans.iter().zip(results) {
        let outcome = match result {
            Ok(output) => {
                let rendered = render_family(&output, plan, &settings).await;
                if plan.chart.group.is_some() {
                    grouped.push((plan, output));
                }
                rendered
            }
            Err(err) => Err(err.into()),
        };
        if let Err(err) = outcome {
            error!("Family '{}' failed: {}", plan.name(), err);
            if first_error.is_none() {
                first_error = Some(err);
            }
        }
    }

    if let Some(dir) = settings.charts_dir.as_deref()
        && let Err(err) = render_groups(&grouped, dir).await
    {
        error!("Chart group failed: {}", err);
        if first_error.is_none() {
            first_error = Some(err);
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Runs every family on its own blocking task over the shared sample set.
///
/// Results come back in plan order.
pub(crate) async fn derive_families(
    samples: Arc<[Sample]>,
    plans: &[FamilyPlan],
) -> AppResult<Vec<EngineResult<FamilyOutput>>> {
    let mut tasks = JoinSet::new();
    for (position, plan) in plans.iter().enumerate() {
        let samples = Arc::clone(&samples);
        let spec = plan.spec.clone();
        tasks.spawn_blocking(move || (position, process_family(&samples, &spec)));
    }

    let mut results = Vec::with_capacity(plans.len());
    while let Some(joined) = tasks.join_next().await {
        results.push(joined?);
    }
    results.sort_by_key(|(position, _)| *position);
    Ok(results.into_iter().map(|(_, result)| result).collect())
}

async fn render_family(
    output: &FamilyOutput,
    plan: &FamilyPlan,
    settings: &OutputSettings,
) -> AppResult<()> {
    print_lines(&summary_lines(output, plan));

    if plan.chart.group.is_none()
        && let Some(dir) = settings.charts_dir.as_deref()
        && let Some(path) = plot_family(&output.name, output.derived.table(), &plan.chart, dir).await?
    {
        info!("Chart written to '{}'", path.display());
    }

    let written = export_family(
        output,
        &plan.chart.unit,
        settings.export_csv.as_deref(),
        settings.export_json.as_deref(),
    )
    .await?;
    for path in &written {
        info!("Exported '{}'", path.display());
    }
    Ok(())
}

/// Draws one chart per group, panels in plan order.
async fn render_groups(grouped: &[(&FamilyPlan, FamilyOutput)], charts_dir: &Path) -> AppResult<()> {
    let mut groups: Vec<&str> = Vec::new();
    for (plan, _) in grouped {
        if let Some(group) = plan.chart.group.as_deref()
            && !groups.contains(&group)
        {
            groups.push(group);
        }
    }

    for group in groups {
        let panels: Vec<Panel<'_>> = grouped
            .iter()
            .filter(|(plan, _)| plan.chart.group.as_deref() == Some(group))
            .map(|(plan, output)| Panel {
                name: &output.name,
                table: output.derived.table(),
                style: &plan.chart,
            })
            .collect();
        if let Some(path) = plot_group(group, &panels, charts_dir).await? {
            info!("Chart written to '{}'", path.display());
        }
    }
    Ok(())
}
