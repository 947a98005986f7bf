//! Core library for the `ratechart` CLI.
//!
//! This crate provides the building blocks used by the binary: sample
//! parsing, the filter/align/derive engine that turns raw metric samples
//! into per-second rate tables, family presets and configuration, chart
//! rendering, and CSV/JSON export. The primary user-facing interface is the
//! `ratechart` command-line application; library APIs may evolve as the CLI
//! grows.
pub mod args;
pub mod charts;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod samples;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;
