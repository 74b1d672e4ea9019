//! Core types for the media insights fixture generator.
//!
//! This crate provides the foundational types shared by the generator,
//! serializer and populator crates:
//!
//! - [`MediaType`] / [`Region`] - Run- and entity-level enumerations
//! - [`MediaEntity`] - One synthesized media record, with per-type fields
//!   carried by the [`MediaKind`] variant
//! - [`RunConfig`] - Validated configuration for a single generator run
//! - [`RunProfile`] - Optional YAML overrides for the fixed run instants
//!
//! # Architecture
//!
//! ```text
//! insights-core (this crate)
//!    │
//!    ├─── insights-generator  (PRNG, synthesizer, lifecycle policy)
//!    │
//!    ├─── insights-json       (envelope serializer, aggregator)
//!    │
//!    └─── insights-populate   (output sink, CLI args)
//! ```

pub mod config;
pub mod entity;
pub mod error;
pub mod types;

pub use config::{
    parse_instant, RunConfig, RunProfile, DEFAULT_COUNT, DEFAULT_IMAGE_BASE_URL,
    DEFAULT_LEGACY_CUTOFF, DEFAULT_REFERENCE_INSTANT, DEFAULT_SEED,
};
pub use entity::{
    round_half_up, Engagement, MediaEntity, MediaKind, NavigationBreakdown,
    ProfileActivityBreakdown, ReelsWatch,
};
pub use error::ConfigError;
pub use types::{Lifecycle, MediaType, Region};
