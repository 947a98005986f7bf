use std::collections::BTreeSet;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::{LabelList, PositiveUsize, ReportArgs};
use crate::config::types::ConfigFile;
use crate::config::{PRESETS, apply_config, resolve_families};
use crate::engine::process_family;
use crate::error::AppResult;
use crate::samples::{Timestamp, parse_samples, parse_timestamp};

thread_local! {
    static BASE_MATCHES: ArgMatches =
        ReportArgs::command().get_matches_from(["ratechart", "metrics.csv"]);
}

/// Parses a time value the way the samples reader does.
#[must_use]
pub fn parse_timestamp_input(input: &str) -> Option<Timestamp> {
    parse_timestamp(input)
}

/// Parses a positive usize string value.
///
/// # Errors
///
/// Returns an error when the value is invalid or zero.
pub fn parse_positive_usize_input(input: &str) -> AppResult<usize> {
    let value: PositiveUsize = input.parse()?;
    Ok(value.get())
}

/// Parses a comma-separated label list.
///
/// # Errors
///
/// Returns an error when the list or one of its entries is empty.
pub fn parse_label_list_input(input: &str) -> AppResult<Vec<String>> {
    let labels: LabelList = input.parse()?;
    Ok(labels.into_vec())
}

/// Parses TOML config, applies it to defaults, and resolves its families.
///
/// # Errors
///
/// Returns an error when parsing or validation fails.
pub fn apply_config_from_toml(input: &str) -> AppResult<()> {
    let config: ConfigFile = toml::from_str(input)?;
    apply_config_to_defaults(&config)
}

/// Parses JSON config, applies it to defaults, and resolves its families.
///
/// # Errors
///
/// Returns an error when parsing or validation fails.
pub fn apply_config_from_json(input: &[u8]) -> AppResult<()> {
    let config: ConfigFile = serde_json::from_slice(input)?;
    apply_config_to_defaults(&config)
}

/// Parses CSV samples and runs every preset family over them.
///
/// # Errors
///
/// Returns an error when the header is missing or incomplete. Per-family
/// engine errors are expected for arbitrary input and are ignored.
pub fn derive_presets_from_csv(input: &str) -> AppResult<usize> {
    let set = parse_samples(input)?;
    let mut rows = 0_usize;
    for preset in &PRESETS {
        let plan = preset.to_plan();
        if let Ok(output) = process_family(&set.samples, &plan.spec) {
            rows = rows.saturating_add(output.derived.table().row_count());
        }
    }
    Ok(rows)
}

fn apply_config_to_defaults(config: &ConfigFile) -> AppResult<()> {
    BASE_MATCHES.with(|matches| {
        let mut args = ReportArgs::from_arg_matches(matches)?;
        apply_config(&mut args, matches, config);
        let present: BTreeSet<String> = PRESETS
            .iter()
            .map(|preset| preset.metric.to_owned())
            .collect();
        resolve_families(&args, Some(config), &present)?;
        Ok(())
    })
}
