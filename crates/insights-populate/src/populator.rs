//! Fixture populator: drives a generation run and writes its files.

use crate::error::PopulatorError;
use insights_core::{Lifecycle, RunConfig};
use insights_generator::FixtureGenerator;
use insights_json::{Aggregator, Envelope};
use serde::Serialize;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Name of the aggregate file written after the entity loop.
pub const AGGREGATE_FILE_NAME: &str = "instagram_insights.per_item.last_30_days.json";

/// File name of the envelope for one entity.
pub fn entity_file_name(id: &str) -> String {
    format!("media_{id}.insights.json")
}

/// A file that could not be written.
#[derive(Debug, Clone)]
pub struct WriteFailure {
    pub path: PathBuf,
    /// `None` for the aggregate file
    pub entity_id: Option<String>,
    pub error: String,
}

/// Metrics from a populate run.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// Number of entities synthesized.
    pub entities_generated: u64,
    /// Number of distinct files written (entity files plus the aggregate).
    pub files_written: u64,
    pub normal: u64,
    pub empty: u64,
    pub error: u64,
    /// Records in the aggregate file.
    pub aggregated: u64,
    /// Bytes serialized (written unless dry run).
    pub bytes_written: u64,
    /// Total time taken.
    pub total_duration: Duration,
    pub failures: Vec<WriteFailure>,
}

impl PopulateMetrics {
    /// Calculate entities per second.
    pub fn entities_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.entities_generated as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Fail if any file of the run could not be written.
    pub fn ensure_complete(&self) -> Result<(), PopulatorError> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(PopulatorError::WriteFailures {
                failed: self.failures.len(),
                total: self.failures.len() + self.files_written as usize,
            })
        }
    }

    fn count_lifecycle(&mut self, lifecycle: Lifecycle) {
        match lifecycle {
            Lifecycle::Normal => self.normal += 1,
            Lifecycle::Empty => self.empty += 1,
            Lifecycle::Error => self.error += 1,
        }
    }
}

/// Serialize a value as 2-space pretty JSON with a trailing newline.
fn to_pretty_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, PopulatorError> {
    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Write one file; the handle is closed before returning on every path.
fn write_file(path: &Path, bytes: &[u8]) -> Result<(), PopulatorError> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(())
}

/// Populator that writes one insights file per entity plus the aggregate.
pub struct InsightsPopulator {
    config: RunConfig,
    dry_run: bool,
}

impl InsightsPopulator {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            dry_run: false,
        }
    }

    /// Serialize everything but skip all filesystem access.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run the generator and write its fixtures into `output_dir`.
    ///
    /// Configuration is validated before the directory is touched. A failed
    /// write is logged and recorded in [`PopulateMetrics::failures`] without
    /// stopping the run; call [`PopulateMetrics::ensure_complete`] to turn
    /// such failures into an error.
    pub fn populate<P: AsRef<Path>>(&self, output_dir: P) -> Result<PopulateMetrics, PopulatorError> {
        self.config.validate()?;

        let start_time = Instant::now();
        let output_dir = output_dir.as_ref();
        let mut metrics = PopulateMetrics::default();

        info!(
            "Generating {} insights fixtures into '{}' (seed={}, region={}, story_highlight={})",
            self.config.count,
            output_dir.display(),
            self.config.seed,
            self.config.region,
            self.config.story_highlight
        );

        if self.dry_run {
            info!("Running in dry-run mode - no files will be written");
        } else {
            fs::create_dir_all(output_dir).map_err(|source| PopulatorError::CreateDir {
                path: output_dir.to_path_buf(),
                source,
            })?;
        }

        let mut generator = FixtureGenerator::new(self.config.clone());
        let mut aggregator = Aggregator::new(&self.config);
        let mut written = HashSet::new();

        for generated in generator.entities() {
            let entity = &generated.entity;
            metrics.entities_generated += 1;
            metrics.count_lifecycle(generated.lifecycle);

            let envelope = Envelope::for_entity(entity, generated.lifecycle);
            let path = output_dir.join(entity_file_name(&entity.id));
            self.emit(&path, &envelope, Some(&entity.id), &mut written, &mut metrics)?;

            if aggregator.observe(entity, generated.lifecycle) {
                debug!("Aggregated entity {}", entity.id);
            }
        }

        let records = aggregator.finish();
        metrics.aggregated = records.len() as u64;
        let path = output_dir.join(AGGREGATE_FILE_NAME);
        self.emit(&path, &records, None, &mut written, &mut metrics)?;

        metrics.total_duration = start_time.elapsed();

        info!(
            "Fixture generation complete: {} entities ({} normal, {} empty, {} error), {} aggregated, {} files, {} bytes in {:?}",
            metrics.entities_generated,
            metrics.normal,
            metrics.empty,
            metrics.error,
            metrics.aggregated,
            metrics.files_written,
            metrics.bytes_written,
            metrics.total_duration
        );
        if !metrics.failures.is_empty() {
            warn!("{} fixture files could not be written", metrics.failures.len());
        }

        Ok(metrics)
    }

    /// Serialize and write one file, recording the outcome in `metrics`.
    ///
    /// Serialization errors abort the run; write errors only affect this file.
    /// A path already in `written` is not counted again.
    fn emit<T: Serialize>(
        &self,
        path: &Path,
        value: &T,
        entity_id: Option<&str>,
        written: &mut HashSet<PathBuf>,
        metrics: &mut PopulateMetrics,
    ) -> Result<(), PopulatorError> {
        let bytes = to_pretty_bytes(value)?;
        metrics.bytes_written += bytes.len() as u64;

        if self.dry_run {
            debug!("Dry run: skipping {}", path.display());
            return Ok(());
        }

        match write_file(path, &bytes) {
            Ok(()) => {
                if written.insert(path.to_path_buf()) {
                    metrics.files_written += 1;
                }
                debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
            }
            Err(e) => {
                error!(
                    "Failed to write {} (entity {}): {}",
                    path.display(),
                    entity_id.unwrap_or("aggregate"),
                    e
                );
                metrics.failures.push(WriteFailure {
                    path: path.to_path_buf(),
                    entity_id: entity_id.map(str::to_string),
                    error: e.to_string(),
                });
            }
        }
        Ok(())
    }
}
