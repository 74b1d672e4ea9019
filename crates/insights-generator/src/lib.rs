//! Deterministic entity generator for media insights fixtures.
//!
//! The generator draws every value from a single seeded [`Mulberry32`]
//! stream, so the same [`RunConfig`](insights_core::RunConfig) always yields
//! the same sequence of entities.
//!
//! # Architecture
//!
//! ```text
//! RunConfig (seed, region, instants)
//!        │
//!        ▼
//! ┌──────────────────────┐
//! │  FixtureGenerator    │
//! │                      │
//! │  - rng (Mulberry32)  │──► synthesize()  ──► MediaEntity
//! │  - index             │──► classify()    ──► Lifecycle
//! └──────────┬───────────┘
//!            │
//!            ▼
//!   GeneratedEntity { index, entity, lifecycle }
//! ```
//!
//! # Example
//!
//! ```rust
//! use insights_core::RunConfig;
//! use insights_generator::FixtureGenerator;
//!
//! let mut generator = FixtureGenerator::new(RunConfig::default());
//! for generated in generator.entities() {
//!     println!("{} {:?}", generated.entity.id, generated.lifecycle);
//! }
//! ```

pub mod generator;
pub mod lifecycle;
pub mod rng;
pub mod synthesizer;

// Re-exports for convenience
pub use generator::{EntityIterator, FixtureGenerator, GeneratedEntity};
pub use lifecycle::{classify, MIN_STORY_VIEWERS, STORY_LIFETIME_HOURS};
pub use rng::{rand_float, rand_int, Mulberry32, UnitSource};
pub use synthesizer::synthesize;
