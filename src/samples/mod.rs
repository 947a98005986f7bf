//! Sample input: timestamps, the `Sample` record, and the CSV reader.
mod reader;
mod timestamp;
mod types;


pub use reader::{ReadReport, SampleSet, parse_samples, read_samples_file};
pub use timestamp::parse_timestamp;
pub use types::{Sample, Timestamp};
