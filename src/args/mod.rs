//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use cli::ReportArgs;
pub use types::{LabelList, PositiveUsize};

pub(crate) use defaults::DEFAULT_CONFIG_FILES;
#[cfg(test)]
pub(crate) use defaults::default_charts_path;
