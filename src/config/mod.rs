//! Family presets, config-file loading, and resolution into report plans.
mod apply;
mod loader;
mod plan;
mod presets;
pub mod types;


pub use apply::{apply_config, resolve_families};
pub use loader::load_config;
pub use plan::{ChartKind, ChartStyle, FamilyPlan};
pub use presets::{PRESETS, Preset, find_preset};

#[cfg(test)]
pub(crate) use loader::load_config_file;
