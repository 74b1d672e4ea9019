//! CLI argument definitions for the fixture generator.

use clap::{ArgAction, Args};
use insights_core::{parse_instant, ConfigError, Region, RunConfig, RunProfile};
use std::path::PathBuf;

fn parse_region(value: &str) -> Result<Region, ConfigError> {
    value.parse()
}

/// Arguments for a generation run.
///
/// Every flag accepts both `--name value` and `--name=value`.
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Random seed for deterministic generation (same seed = same fixtures)
    #[arg(long, default_value = "42", env = "INSIGHTS_SEED", allow_negative_numbers = true)]
    pub seed: i64,

    /// Number of media entities to generate
    #[arg(long, default_value = "15", env = "INSIGHTS_COUNT")]
    pub count: u64,

    /// Output directory (created if missing)
    #[arg(long, default_value = "mocks", env = "INSIGHTS_OUT")]
    pub out: PathBuf,

    /// Market region: global, eu or jp (eu/jp report no story replies)
    #[arg(long, default_value = "global", value_parser = parse_region, env = "INSIGHTS_REGION")]
    pub region: Region,

    /// Keep insights for stories older than 24h
    #[arg(
        long = "story_highlight",
        default_value = "false",
        action = ArgAction::Set,
        env = "INSIGHTS_STORY_HIGHLIGHT"
    )]
    pub story_highlight: bool,

    /// Fixed "now" for the run (RFC 3339 or YYYY-MM-DD)
    #[arg(long = "reference_instant", value_name = "INSTANT")]
    pub reference_instant: Option<String>,

    /// Media created at or before this instant reports legacy impressions
    #[arg(long = "legacy_cutoff", value_name = "INSTANT")]
    pub legacy_cutoff: Option<String>,

    /// YAML run profile overriding instants and the image base URL
    #[arg(long, value_name = "PATH", env = "INSIGHTS_PROFILE")]
    pub profile: Option<PathBuf>,

    /// Generate and serialize everything without writing files
    #[arg(long = "dry_run")]
    pub dry_run: bool,
}

impl GenerateArgs {
    /// Build and validate the run configuration.
    ///
    /// Precedence: explicit instant flags, then the profile, then defaults.
    pub fn to_run_config(&self) -> Result<RunConfig, ConfigError> {
        let mut config = RunConfig {
            seed: self.seed,
            count: self.count,
            region: self.region,
            story_highlight: self.story_highlight,
            ..RunConfig::default()
        };

        if let Some(path) = &self.profile {
            config = config.with_profile(&RunProfile::from_file(path)?)?;
        }
        if let Some(value) = &self.reference_instant {
            config.reference_instant = parse_instant("reference_instant", value)?;
        }
        if let Some(value) = &self.legacy_cutoff {
            config.legacy_cutoff = parse_instant("legacy_cutoff", value)?;
        }

        config.validate()?;
        Ok(config)
    }
}
