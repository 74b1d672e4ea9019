//! Fixture populator for media insights.
//!
//! This crate runs the generator and writes its output to a directory: one
//! envelope file per entity plus a single aggregate file for the trailing
//! 30-day window.
//!
//! # Example
//!
//! ```ignore
//! use insights_core::RunConfig;
//! use insights_populate::InsightsPopulator;
//!
//! let populator = InsightsPopulator::new(RunConfig::default());
//! let metrics = populator.populate("mocks")?;
//! println!("Wrote {} files in {:?}", metrics.files_written, metrics.total_duration);
//! ```

pub mod args;
pub mod error;
pub mod populator;

pub use args::GenerateArgs;
pub use error::PopulatorError;
pub use populator::{
    entity_file_name, InsightsPopulator, PopulateMetrics, WriteFailure, AGGREGATE_FILE_NAME,
};
