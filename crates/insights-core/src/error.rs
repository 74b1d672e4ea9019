//! Error types for run configuration.

/// Errors detected while assembling a [`crate::RunConfig`].
///
/// All of these are raised before any entity is synthesized, so a failing
/// run never leaves partial output behind.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Region name not recognised
    #[error("Unknown region '{0}' (expected one of: global, eu, jp)")]
    UnknownRegion(String),

    /// Timestamp could not be parsed
    #[error("Invalid instant '{value}' for {field}: expected RFC 3339 or YYYY-MM-DD")]
    InvalidInstant { field: &'static str, value: String },

    /// Legacy cutoff lies after the reference instant
    #[error("Legacy cutoff {cutoff} is after reference instant {reference}")]
    CutoffAfterReference { cutoff: String, reference: String },

    /// Image base URL is empty
    #[error("Image base URL must not be empty")]
    EmptyImageBaseUrl,

    /// Error reading profile file
    #[error("Failed to read run profile: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse run profile YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
}
