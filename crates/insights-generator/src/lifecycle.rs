//! Lifecycle policy: picks the output shape of a synthesized entity.
//!
//! Rules are evaluated in order and the first match wins:
//!
//! 1. An expired story (older than 24h, run not flagged as story highlight)
//!    is [`Lifecycle::Empty`].
//! 2. A story with fewer than [`MIN_STORY_VIEWERS`] views is
//!    [`Lifecycle::Error`].
//! 3. Everything else is [`Lifecycle::Normal`].

use chrono::Duration;
use insights_core::{Lifecycle, MediaEntity, MediaType, RunConfig};

/// Stories stop reporting insights once they are older than this.
pub const STORY_LIFETIME_HOURS: i64 = 24;

/// Below this view count the upstream API refuses story insights.
pub const MIN_STORY_VIEWERS: u64 = 5;

/// Classify an entity into its terminal output shape.
pub fn classify(entity: &MediaEntity, config: &RunConfig) -> Lifecycle {
    if entity.media_type() != MediaType::Story {
        return Lifecycle::Normal;
    }

    let expired =
        entity.age_at(config.reference_instant) > Duration::hours(STORY_LIFETIME_HOURS);
    if expired && !config.story_highlight {
        Lifecycle::Empty
    } else if entity.views < MIN_STORY_VIEWERS {
        Lifecycle::Error
    } else {
        Lifecycle::Normal
    }
}
