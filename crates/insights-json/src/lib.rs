//! JSON shapes for media insights fixtures.
//!
//! This crate maps entities from `insights-core` onto the nested JSON shapes
//! of the upstream insights API.
//!
//! # Modules
//!
//! - [`envelope`] - per-entity envelopes (normal metric list, empty, error)
//! - [`aggregate`] - flat per-item summary collected over the trailing window
//!
//! # Example
//!
//! ```ignore
//! use insights_json::{Aggregator, Envelope};
//!
//! let envelope = Envelope::for_entity(&entity, lifecycle);
//! let json = serde_json::to_string_pretty(&envelope)?;
//!
//! let mut aggregator = Aggregator::new(&config);
//! aggregator.observe(&entity, lifecycle);
//! let records = aggregator.finish();
//! ```

pub mod aggregate;
pub mod envelope;

pub use aggregate::{AggregateRecord, Aggregator, AGGREGATE_WINDOW_DAYS, TIMESTAMP_FORMAT};
pub use envelope::{
    ApiError, Breakdown, Envelope, MetricRecord, MetricValue, MetricValueEntry,
    NOT_ENOUGH_VIEWERS_CODE, NOT_ENOUGH_VIEWERS_MESSAGE,
};
