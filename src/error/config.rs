use std::path::PathBuf;

use thiserror::Error;

use super::ValidationError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML config '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to parse JSON config '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported config extension '{ext}'. Use .toml or .json.")]
    UnsupportedExtension { ext: String },
    #[error("Config file must have .toml or .json extension.")]
    MissingExtension,
    #[error("Unknown family '{name}'. Run with --list-families to see presets.")]
    UnknownPreset { name: String },
    #[error("Family '{name}' must set '{field}' (or start from a preset).")]
    FamilyMissingField { name: String, field: &'static str },
    #[error("Family '{name}' must recognize at least one label.")]
    FamilyNoLabels { name: String },
    #[error("Family '{name}' is defined more than once.")]
    DuplicateFamily { name: String },
    #[error("Config '{field}' must be >= 1.")]
    FieldMustBePositive {
        field: String,
        #[source]
        source: ValidationError,
    },
    #[error("Family '{name}' unit_scale must be finite and non-zero, got {value}.")]
    InvalidUnitScale { name: String, value: f64 },
    #[error("No families to report: none were requested and no preset matches the input.")]
    NoFamilies,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
