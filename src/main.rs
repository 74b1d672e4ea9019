//! Command-line interface for insights-fixtures
//!
//! # Usage Examples
//!
//! ```bash
//! # Defaults: --seed 42 --count 15 --out mocks --region global --story_highlight false
//! insights-fixtures
//!
//! # Both `--name value` and `--name=value` are accepted
//! insights-fixtures --seed=1234 --count 100 --region=jp
//!
//! # Pin the run to another reference instant and preview without writing
//! insights-fixtures --reference_instant 2025-01-31T00:00:00Z --dry_run
//!
//! # Load instants and image base URL from a YAML profile
//! insights-fixtures --profile profile.yaml
//! ```
//!
//! Set `RUST_LOG=insights_populate=debug` to log every entity and file.

use clap::Parser;
use insights_fixtures::GenerateArgs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "insights-fixtures")]
#[command(about = "Generate deterministic synthetic media insights fixtures")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    args: GenerateArgs,
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let metrics = insights_fixtures::generate(&cli.args)?;

    tracing::info!(
        "Done: {} entities, {} files written to {:?}",
        metrics.entities_generated,
        metrics.files_written,
        cli.args.out
    );
    Ok(())
}
