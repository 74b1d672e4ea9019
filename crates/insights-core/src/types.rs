//! Enumerations shared across the fixture pipeline.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Media type of a synthesized entity.
///
/// Drawn once per entity and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Feed,
    Reels,
    Story,
}

impl MediaType {
    /// Name used by the upstream API (`FEED`, `REELS`, `STORY`).
    pub fn as_api_str(&self) -> &'static str {
        match self {
            MediaType::Feed => "FEED",
            MediaType::Reels => "REELS",
            MediaType::Story => "STORY",
        }
    }

    /// Human-facing label used in aggregate records.
    pub fn label(&self) -> &'static str {
        match self {
            MediaType::Feed => "post",
            MediaType::Reels => "reel",
            MediaType::Story => "story",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

/// Terminal output shape of an entity, decided once after synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Full insights payload, eligible for aggregation
    Normal,
    /// `{"data": []}`
    Empty,
    /// Upstream-shaped error envelope
    Error,
}

/// Market region the run simulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    #[default]
    Global,
    Eu,
    Jp,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Global => "global",
            Region::Eu => "eu",
            Region::Jp => "jp",
        }
    }

    /// Story replies are not reported in these regions and are forced to zero.
    pub fn suppresses_story_replies(&self) -> bool {
        matches!(self, Region::Eu | Region::Jp)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(Region::Global),
            "eu" => Ok(Region::Eu),
            "jp" => Ok(Region::Jp),
            _ => Err(ConfigError::UnknownRegion(s.to_string())),
        }
    }
}
