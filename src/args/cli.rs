use std::path::PathBuf;

use clap::Parser;

use super::defaults::default_charts_path;
use super::parsers::{parse_bool_env, parse_label_list, parse_positive_usize};
use super::types::{LabelList, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Turn raw metric samples into per-second rate and duration tables, with PNG charts and CSV/JSON exports."
)]
pub struct ReportArgs {
    /// Metrics CSV with time, name, label, and value columns
    #[arg(value_name = "INPUT", required_unless_present = "list_families")]
    pub input: Option<PathBuf>,

    /// Family to report: a preset or a [[family]] from the config (repeatable)
    #[arg(long = "family", short = 'f', value_name = "NAME")]
    pub families: Vec<String>,

    /// Path to config file (TOML/JSON). Defaults to ./ratechart.toml or ./ratechart.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Rows between the two ends of each rate window (default: 10)
    #[arg(long, short = 'w', value_parser = parse_positive_usize)]
    pub window: Option<PositiveUsize>,

    /// Comma-separated label allow-list applied to every selected family
    #[arg(long, value_parser = parse_label_list)]
    pub labels: Option<LabelList>,

    /// Directory for PNG charts
    #[arg(long = "charts-path", short = 'c', default_value_t = default_charts_path())]
    pub charts_path: String,

    /// Disable chart generation
    #[arg(long = "no-charts")]
    pub no_charts: bool,

    /// Write one CSV table per family into this directory
    #[arg(long = "export-csv", value_name = "DIR")]
    pub export_csv: Option<String>,

    /// Write one JSON table per family into this directory
    #[arg(long = "export-json", value_name = "DIR")]
    pub export_json: Option<String>,

    /// Print the built-in family presets and exit
    #[arg(long = "list-families")]
    pub list_families: bool,

    /// Enable verbose logging (sets log level to debug unless overridden by RATECHART_LOG/RUST_LOG)
    #[arg(long, short)]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
