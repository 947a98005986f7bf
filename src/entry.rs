use std::ffi::OsString;
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::app::run_report;
use crate::args::{DEFAULT_CONFIG_FILES, ReportArgs};
use crate::config::{PRESETS, Preset};
use crate::error::AppResult;

const LABELS_HINT: &str = "Samples with other labels are ignored; use --labels a,b,c or a [[family]] labels key to change a family's allow-list.";

pub(crate) fn run() -> AppResult<()> {
    let (args, matches) = match parse_args()? {
        Some(parsed) => parsed,
        None => return Ok(()),
    };

    crate::logger::init_logging(args.verbose, args.no_color);

    if args.list_families {
        print_families(&PRESETS);
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_report(args, &matches))
}

fn parse_args() -> AppResult<Option<(ReportArgs, ArgMatches)>> {
    let mut cmd = ReportArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = ReportArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

fn family_lines(presets: &[Preset]) -> Vec<String> {
    let width = presets
        .iter()
        .map(|preset| preset.name.len())
        .max()
        .unwrap_or(0);
    presets
        .iter()
        .map(|preset| {
            format!(
                "{:<width$}  {:<13}  {}: {}",
                preset.name,
                preset.kind.as_str(),
                preset.metric,
                preset.labels.join(", "),
                width = width
            )
        })
        .collect()
}

fn print_families(presets: &[Preset]) {
    for line in family_lines(presets) {
        println!("{}", line);
    }
    println!();
    println!("{}", LABELS_HINT);
}
