//! Sample-to-rate derivation engine.
//!
//! A family of samples flows through four stages: [`filter_samples`] picks
//! one metric and its recognized labels, [`align`] reshapes the samples into
//! a dense forward-filled table, [`apply_column_order`] optionally permutes
//! the columns into a canonical order, and [`derive`] turns cumulative
//! counters into per-second rates or scales instantaneous readings.
//! [`process_family`] runs all of them for one [`FamilySpec`].
//!
//! The engine is synchronous and never reads process state; every input
//! arrives through its arguments.
mod align;
mod filter;
mod order;
mod pipeline;
mod rate;
mod spec;
mod table;


pub use align::align;
pub use filter::{FilteredSamples, filter_samples};
pub use order::apply_column_order;
pub use pipeline::{FamilyOutput, process_family};
pub use rate::{DeriveOptions, DeriveStats, derive, derive_rates, scale_measures};
pub use spec::{
    Aggregation, DEFAULT_WINDOW, FamilySpec, LeadingFill, MetricKind, OrderPolicy, ResetPolicy,
};
pub use table::{AlignedTable, DerivedTable, RateTable, Table};
