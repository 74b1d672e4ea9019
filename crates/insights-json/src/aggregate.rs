//! Per-item aggregate over the trailing window.
//!
//! Collects a flat summary of every normal entity created within
//! [`AGGREGATE_WINDOW_DAYS`] of the reference instant, in creation order.
//! The collected set is only handed out once, by [`Aggregator::finish`].

use chrono::{DateTime, Duration, Utc};
use insights_core::{Lifecycle, MediaEntity, RunConfig};
use serde::Serialize;

pub const AGGREGATE_WINDOW_DAYS: i64 = 30;

/// Timestamp layout used by the upstream API (`2024-08-15T12:00:00+0000`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Flattened summary of one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateRecord {
    pub id: String,
    /// Human-facing label: `post`, `reel` or `story`
    #[serde(rename = "type")]
    pub media_type: &'static str,
    pub timestamp: String,
    pub views: u64,
    pub reach: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<u64>,
    pub shares: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replies: Option<u64>,
    pub follows: u64,
    pub image_url: String,
}

impl AggregateRecord {
    pub fn from_entity(entity: &MediaEntity, image_base_url: &str) -> Self {
        let engagement = entity.engagement();
        Self {
            id: entity.id.clone(),
            media_type: entity.media_type().label(),
            timestamp: entity.created_at.format(TIMESTAMP_FORMAT).to_string(),
            views: entity.views,
            reach: entity.reach,
            likes: engagement.map(|e| e.likes),
            comments: engagement.map(|e| e.comments),
            saved: engagement.map(|e| e.saved),
            shares: entity.shares(),
            replies: entity.replies(),
            follows: entity.follows,
            image_url: format!(
                "{}/{}/640/640",
                image_base_url.trim_end_matches('/'),
                entity.id
            ),
        }
    }
}

/// Collects aggregate records over a run.
#[derive(Debug)]
pub struct Aggregator {
    window_start: DateTime<Utc>,
    image_base_url: String,
    records: Vec<AggregateRecord>,
}

impl Aggregator {
    pub fn new(config: &RunConfig) -> Self {
        Self {
            window_start: config.reference_instant - Duration::days(AGGREGATE_WINDOW_DAYS),
            image_base_url: config.image_base_url.clone(),
            records: Vec::new(),
        }
    }

    /// Record the entity if it is normal and inside the window.
    ///
    /// Returns whether the entity was collected.
    pub fn observe(&mut self, entity: &MediaEntity, lifecycle: Lifecycle) -> bool {
        if lifecycle != Lifecycle::Normal || entity.created_at < self.window_start {
            return false;
        }
        self.records
            .push(AggregateRecord::from_entity(entity, &self.image_base_url));
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the aggregator and return the records in creation order.
    pub fn finish(self) -> Vec<AggregateRecord> {
        self.records
    }
}
