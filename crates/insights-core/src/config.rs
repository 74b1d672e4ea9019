//! Run configuration.
//!
//! A [`RunConfig`] is assembled from CLI arguments (and optionally a YAML
//! [`RunProfile`]) and validated before the first entity is drawn.

use crate::error::ConfigError;
use crate::types::Region;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_SEED: i64 = 42;
pub const DEFAULT_COUNT: u64 = 15;

/// Fixed "now" every run is computed relative to.
pub const DEFAULT_REFERENCE_INSTANT: &str = "2024-08-15T12:00:00Z";

/// Media created at or before this instant still reports legacy impressions.
pub const DEFAULT_LEGACY_CUTOFF: &str = "2024-07-01T00:00:00Z";

pub const DEFAULT_IMAGE_BASE_URL: &str = "https://picsum.photos/seed";

/// Parse an instant in RFC 3339 or `YYYY-MM-DD` (midnight UTC) form.
pub fn parse_instant(field: &'static str, value: &str) -> Result<DateTime<Utc>, ConfigError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ConfigError::InvalidInstant {
            field,
            value: value.to_string(),
        })
}

/// Configuration for a single generator run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Seed for the pseudo-random stream
    pub seed: i64,
    /// Number of entities to synthesize
    pub count: u64,
    pub region: Region,
    /// When set, stories older than 24h still produce insights
    pub story_highlight: bool,
    pub reference_instant: DateTime<Utc>,
    pub legacy_cutoff: DateTime<Utc>,
    /// Base URL used to build aggregate `image_url` values
    pub image_base_url: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        // The defaults are compile-time literals and always parse.
        let reference_instant = DateTime::parse_from_rfc3339(DEFAULT_REFERENCE_INSTANT)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        let legacy_cutoff = DateTime::parse_from_rfc3339(DEFAULT_LEGACY_CUTOFF)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        Self {
            seed: DEFAULT_SEED,
            count: DEFAULT_COUNT,
            region: Region::Global,
            story_highlight: false,
            reference_instant,
            legacy_cutoff,
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
        }
    }
}

impl RunConfig {
    /// Seed folded to the 32-bit state of the PRNG (two's complement wrap).
    pub fn prng_seed(&self) -> u32 {
        self.seed as u32
    }

    /// Apply the overrides carried by a profile.
    pub fn with_profile(mut self, profile: &RunProfile) -> Result<Self, ConfigError> {
        if let Some(value) = &profile.reference_instant {
            self.reference_instant = parse_instant("reference_instant", value)?;
        }
        if let Some(value) = &profile.legacy_cutoff {
            self.legacy_cutoff = parse_instant("legacy_cutoff", value)?;
        }
        if let Some(value) = &profile.image_base_url {
            self.image_base_url = value.clone();
        }
        Ok(self)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.legacy_cutoff > self.reference_instant {
            return Err(ConfigError::CutoffAfterReference {
                cutoff: self.legacy_cutoff.to_rfc3339(),
                reference: self.reference_instant.to_rfc3339(),
            });
        }
        if self.image_base_url.trim().is_empty() {
            return Err(ConfigError::EmptyImageBaseUrl);
        }
        Ok(())
    }
}

/// Optional YAML overrides for a run.
///
/// ```yaml
/// reference_instant: "2024-08-15T12:00:00Z"
/// legacy_cutoff: "2024-07-01"
/// image_base_url: "https://cdn.example.com/media"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunProfile {
    #[serde(default)]
    pub reference_instant: Option<String>,
    #[serde(default)]
    pub legacy_cutoff: Option<String>,
    #[serde(default)]
    pub image_base_url: Option<String>,
}

impl RunProfile {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.count, 15);
        assert_eq!(config.region, Region::Global);
        assert!(!config.story_highlight);
        assert_eq!(
            config.reference_instant,
            Utc.with_ymd_and_hms(2024, 8, 15, 12, 0, 0).unwrap()
        );
        assert_eq!(
            config.legacy_cutoff,
            Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap()
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_prng_seed_wraps() {
        let config = RunConfig {
            seed: -1,
            ..RunConfig::default()
        };
        assert_eq!(config.prng_seed(), u32::MAX);

        let config = RunConfig {
            seed: (1_i64 << 32) + 7,
            ..RunConfig::default()
        };
        assert_eq!(config.prng_seed(), 7);
    }

    #[test]
    fn test_parse_instant_formats() {
        let dt = parse_instant("reference_instant", "2024-01-02T03:04:05+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 2, 1, 4, 5).unwrap());

        let dt = parse_instant("legacy_cutoff", "2024-07-01").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap());

        let err = parse_instant("legacy_cutoff", "yesterday").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidInstant {
                field: "legacy_cutoff",
                ..
            }
        ));
    }

    #[test]
    fn test_cutoff_after_reference_rejected() {
        let config = RunConfig {
            legacy_cutoff: Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
            ..RunConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CutoffAfterReference { .. })
        ));
    }

    #[test]
    fn test_profile_overrides() {
        let profile = RunProfile::from_yaml(
            r#"
reference_instant: "2025-03-01T00:00:00Z"
image_base_url: "https://cdn.example.com/media"
"#,
        )
        .unwrap();

        let config = RunConfig::default().with_profile(&profile).unwrap();
        assert_eq!(
            config.reference_instant,
            Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(config.image_base_url, "https://cdn.example.com/media");
        // Untouched fields keep their defaults
        assert_eq!(config.legacy_cutoff, RunConfig::default().legacy_cutoff);
    }

    #[test]
    fn test_profile_rejects_unknown_fields() {
        let result = RunProfile::from_yaml("seed: 7\n");
        assert!(matches!(result, Err(ConfigError::YamlError(_))));
    }

    #[test]
    fn test_profile_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("profile.yaml");
        fs::write(&path, "legacy_cutoff: \"2024-06-01\"\n").unwrap();

        let profile = RunProfile::from_file(&path).unwrap();
        assert_eq!(profile.legacy_cutoff.as_deref(), Some("2024-06-01"));

        let missing = RunProfile::from_file(dir.path().join("missing.yaml"));
        assert!(matches!(missing, Err(ConfigError::IoError(_))));
    }
}
