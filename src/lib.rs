//! Insights Fixtures Library
//!
//! Generates a deterministic corpus of synthetic media insights records and
//! writes them in the nested JSON shape of the upstream insights API,
//! including its empty and error responses.
//!
//! # Features
//!
//! - Reproducible: the same seed and flags always produce byte-identical files
//! - Per-type business rules: feed posts, reels and stories carry different metrics
//! - Upstream conditions: expired stories and low-viewer stories mimic real API replies
//! - Aggregate: a flat per-item summary of the trailing 30 days
//!
//! # Pipeline Crates
//!
//! - `insights_core` - entity model and run configuration
//! - `insights_generator` - seeded PRNG, synthesizer and lifecycle policy
//! - `insights_json` - envelope serializer and aggregator
//! - `insights_populate` - output sink and CLI arguments
//!
//! # CLI Usage
//!
//! ```bash
//! # Default run: seed 42, 15 entities, written to ./mocks
//! insights-fixtures
//!
//! # EU market, keep expired stories, custom output directory
//! insights-fixtures --seed=7 --count 50 --region eu --story_highlight=true --out fixtures
//! ```

use anyhow::Context;
use tracing::info;

pub use insights_core::{Lifecycle, MediaEntity, MediaType, Region, RunConfig, RunProfile};
pub use insights_generator::{FixtureGenerator, GeneratedEntity};
pub use insights_json::{AggregateRecord, Aggregator, Envelope};
pub use insights_populate::{
    entity_file_name, GenerateArgs, InsightsPopulator, PopulateMetrics, AGGREGATE_FILE_NAME,
};

/// Run a full generation from parsed CLI arguments.
///
/// Configuration problems are reported before anything is written. Write
/// failures of individual files are reported after the run completes.
pub fn generate(args: &GenerateArgs) -> anyhow::Result<PopulateMetrics> {
    let config = args
        .to_run_config()
        .context("Invalid run configuration")?;

    info!(
        "Reference instant {}, legacy cutoff {}",
        config.reference_instant, config.legacy_cutoff
    );

    let metrics = InsightsPopulator::new(config)
        .with_dry_run(args.dry_run)
        .populate(&args.out)
        .with_context(|| format!("Failed to generate fixtures into {:?}", args.out))?;

    metrics
        .ensure_complete()
        .with_context(|| format!("Incomplete fixture output in {:?}", args.out))?;

    Ok(metrics)
}
