//! Per-entity insights envelopes.
//!
//! A normal entity becomes an ordered list of metric records:
//!
//! ```json
//! {"data": [{"name": "views", "period": "lifetime", "values": [{"value": 207}]}, ...]}
//! ```
//!
//! Metrics missing on an entity are left out of the list, never emitted as
//! `null`. The emission order is fixed so generated files can be compared
//! as golden files.

use insights_core::{Lifecycle, MediaEntity};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

pub const NOT_ENOUGH_VIEWERS_MESSAGE: &str = "(#10) Not enough viewers";
pub const NOT_ENOUGH_VIEWERS_CODE: u32 = 10;

const PERIOD_LIFETIME: &str = "lifetime";

/// Top-level JSON object written for one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Envelope {
    Data { data: Vec<MetricRecord> },
    Error { error: ApiError },
}

/// Upstream API error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    pub message: String,
    pub code: u32,
}

/// One named metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRecord {
    pub name: &'static str,
    pub period: &'static str,
    pub values: Vec<MetricValueEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricValueEntry {
    pub value: MetricValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdowns: Option<Breakdown>,
}

/// Numeric metric value.
///
/// Whole-number seconds are written without a fractional part (`10`, not
/// `10.0`), the way JavaScript prints numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Count(u64),
    Seconds(f64),
}

/// Largest integer an `f64` represents exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            MetricValue::Count(count) => serializer.serialize_u64(count),
            MetricValue::Seconds(seconds)
                if seconds.fract() == 0.0 && (0.0..=MAX_EXACT_INTEGER).contains(&seconds) =>
            {
                serializer.serialize_u64(seconds as u64)
            }
            MetricValue::Seconds(seconds) => serializer.serialize_f64(seconds),
        }
    }
}

/// Per-category counters nested under a single dimension key:
/// `{"action_type": {"CALL": 1, ...}}`.
///
/// Serialized by hand so counters keep their declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakdown {
    pub dimension: &'static str,
    pub counters: Vec<(&'static str, u64)>,
}

impl Breakdown {
    pub fn new(dimension: &'static str, counters: &[(&'static str, u64)]) -> Self {
        Self {
            dimension,
            counters: counters.to_vec(),
        }
    }

    pub fn total(&self) -> u64 {
        self.counters.iter().map(|(_, v)| v).sum()
    }
}

struct Counters<'a>(&'a [(&'static str, u64)]);

impl Serialize for Counters<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Serialize for Breakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.dimension, &Counters(&self.counters))?;
        map.end()
    }
}

impl MetricRecord {
    fn lifetime(name: &'static str, value: MetricValue, breakdowns: Option<Breakdown>) -> Self {
        Self {
            name,
            period: PERIOD_LIFETIME,
            values: vec![MetricValueEntry { value, breakdowns }],
        }
    }

    fn count(name: &'static str, value: u64) -> Self {
        Self::lifetime(name, MetricValue::Count(value), None)
    }

    /// Record whose value is the total of its breakdown.
    fn breakdown(name: &'static str, breakdown: Breakdown) -> Self {
        Self::lifetime(name, MetricValue::Count(breakdown.total()), Some(breakdown))
    }
}

/// Metric records for a normal entity, in emission order.
pub fn metrics_for(entity: &MediaEntity) -> Vec<MetricRecord> {
    let mut data = vec![
        MetricRecord::count("views", entity.views),
        MetricRecord::count("reach", entity.reach),
    ];

    if let Some(engagement) = entity.engagement() {
        data.push(MetricRecord::count("likes", engagement.likes));
        data.push(MetricRecord::count("comments", engagement.comments));
        data.push(MetricRecord::count("saved", engagement.saved));
    }
    data.push(MetricRecord::count("shares", entity.shares()));
    data.push(MetricRecord::count("follows", entity.follows));

    if let Some(replies) = entity.replies() {
        data.push(MetricRecord::count("replies", replies));
    }
    if let Some(impressions) = entity.impressions_legacy() {
        data.push(MetricRecord::count("impressions", impressions));
    }
    if let Some(navigation) = entity.navigation() {
        data.push(MetricRecord::breakdown(
            "navigation",
            Breakdown::new("story_navigation_action_type", &navigation.entries()),
        ));
    }
    data.push(MetricRecord::breakdown(
        "profile_activity",
        Breakdown::new("action_type", &entity.profile_activity.entries()),
    ));

    if let Some(watch) = entity.reels_watch() {
        data.push(MetricRecord::lifetime(
            "ig_reels_avg_watch_time",
            MetricValue::Seconds(watch.avg_watch_time),
            None,
        ));
        data.push(MetricRecord::count(
            "ig_reels_video_view_total_time",
            watch.video_view_total_time,
        ));
    }

    data
}

impl Envelope {
    /// `{"data": []}`
    pub fn empty() -> Self {
        Envelope::Data { data: Vec::new() }
    }

    /// `{"error": {"message": "(#10) Not enough viewers", "code": 10}}`
    pub fn not_enough_viewers() -> Self {
        Envelope::Error {
            error: ApiError {
                message: NOT_ENOUGH_VIEWERS_MESSAGE.to_string(),
                code: NOT_ENOUGH_VIEWERS_CODE,
            },
        }
    }

    /// Build the envelope for an entity in the given lifecycle state.
    pub fn for_entity(entity: &MediaEntity, lifecycle: Lifecycle) -> Self {
        match lifecycle {
            Lifecycle::Normal => Envelope::Data {
                data: metrics_for(entity),
            },
            Lifecycle::Empty => Envelope::empty(),
            Lifecycle::Error => Envelope::not_enough_viewers(),
        }
    }

    /// Metric names in emission order (empty for error envelopes).
    pub fn metric_names(&self) -> Vec<&'static str> {
        match self {
            Envelope::Data { data } => data.iter().map(|m| m.name).collect(),
            Envelope::Error { .. } => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use insights_core::{
        Engagement, MediaKind, NavigationBreakdown, ProfileActivityBreakdown, ReelsWatch,
    };
    use serde_json::json;

    fn activity() -> ProfileActivityBreakdown {
        ProfileActivityBreakdown {
            bio_link_clicked: 2,
            call: 1,
            direction: 0,
            email: 3,
            other: 1,
            text: 0,
        }
    }

    fn engagement() -> Engagement {
        Engagement {
            likes: 13,
            comments: 1,
            saved: 2,
            shares: 1,
        }
    }

    fn entity(kind: MediaKind, views: u64) -> MediaEntity {
        MediaEntity {
            id: "50346150".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 8, 1, 12, 0, 0).unwrap(),
            views,
            reach: 150,
            kind,
            profile_activity: activity(),
            follows: 4,
        }
    }

    fn story(views: u64) -> MediaEntity {
        entity(
            MediaKind::Story {
                shares: 3,
                replies: 1,
                navigation: NavigationBreakdown {
                    tap_forward: 18,
                    tap_back: 6,
                    tap_exit: 4,
                    swipe_forward: 15,
                },
                impressions_legacy: Some(155),
            },
            views,
        )
    }

    fn value_of<'a>(json: &'a serde_json::Value, name: &str) -> Option<&'a serde_json::Value> {
        json["data"]
            .as_array()?
            .iter()
            .find(|m| m["name"] == name)
            .map(|m| &m["values"][0])
    }

    #[test]
    fn test_feed_metric_order() {
        let feed = entity(
            MediaKind::Feed {
                engagement: engagement(),
                impressions_legacy: Some(210),
            },
            200,
        );
        let envelope = Envelope::for_entity(&feed, Lifecycle::Normal);
        assert_eq!(
            envelope.metric_names(),
            vec![
                "views",
                "reach",
                "likes",
                "comments",
                "saved",
                "shares",
                "follows",
                "impressions",
                "profile_activity",
            ]
        );
    }

    #[test]
    fn test_story_metric_order() {
        let envelope = Envelope::for_entity(&story(143), Lifecycle::Normal);
        assert_eq!(
            envelope.metric_names(),
            vec![
                "views",
                "reach",
                "shares",
                "follows",
                "replies",
                "impressions",
                "navigation",
                "profile_activity",
            ]
        );
    }

    #[test]
    fn test_reels_derived_total_time() {
        let reels = entity(
            MediaKind::Reels {
                engagement: engagement(),
                watch: ReelsWatch::new(200, 10.0),
            },
            200,
        );
        let json = serde_json::to_value(Envelope::for_entity(&reels, Lifecycle::Normal)).unwrap();

        assert_eq!(
            value_of(&json, "ig_reels_video_view_total_time"),
            Some(&json!({"value": 2000}))
        );
        assert_eq!(
            value_of(&json, "ig_reels_avg_watch_time"),
            Some(&json!({"value": 10}))
        );
        assert!(value_of(&json, "navigation").is_none());
        assert!(value_of(&json, "impressions").is_none());
    }

    #[test]
    fn test_breakdown_shape_and_sum() {
        let json = serde_json::to_value(Envelope::for_entity(&story(143), Lifecycle::Normal))
            .unwrap();

        assert_eq!(
            value_of(&json, "navigation"),
            Some(&json!({
                "value": 43,
                "breakdowns": {
                    "story_navigation_action_type": {
                        "TAP_FORWARD": 18,
                        "TAP_BACK": 6,
                        "TAP_EXIT": 4,
                        "SWIPE_FORWARD": 15
                    }
                }
            }))
        );
        assert_eq!(
            value_of(&json, "profile_activity"),
            Some(&json!({
                "value": 7,
                "breakdowns": {
                    "action_type": {
                        "BIO_LINK_CLICKED": 2,
                        "CALL": 1,
                        "DIRECTION": 0,
                        "EMAIL": 3,
                        "OTHER": 1,
                        "TEXT": 0
                    }
                }
            }))
        );
    }

    #[test]
    fn test_seconds_print_like_javascript_numbers() {
        let text = |value| serde_json::to_string(&value).unwrap();
        assert_eq!(text(MetricValue::Seconds(10.0)), "10");
        assert_eq!(text(MetricValue::Seconds(0.0)), "0");
        assert_eq!(text(MetricValue::Seconds(11.667804661206901)), "11.667804661206901");
        assert_eq!(text(MetricValue::Seconds(6.5)), "6.5");
        assert_eq!(text(MetricValue::Count(2000)), "2000");
    }

    #[test]
    fn test_breakdown_keeps_declared_order() {
        let breakdown = Breakdown::new("dim", &[("ZETA", 1), ("ALPHA", 2)]);
        let text = serde_json::to_string(&breakdown).unwrap();
        assert_eq!(text, r#"{"dim":{"ZETA":1,"ALPHA":2}}"#);
        assert_eq!(breakdown.total(), 3);
    }

    #[test]
    fn test_metric_record_shape() {
        let record = MetricRecord::count("views", 207);
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"name": "views", "period": "lifetime", "values": [{"value": 207}]})
        );
    }

    #[test]
    fn test_error_envelope() {
        let envelope = Envelope::for_entity(&story(3), Lifecycle::Error);
        assert_eq!(
            serde_json::to_string(&envelope).unwrap(),
            r#"{"error":{"message":"(#10) Not enough viewers","code":10}}"#
        );
        assert!(envelope.metric_names().is_empty());
    }

    #[test]
    fn test_empty_envelope() {
        let envelope = Envelope::for_entity(&story(3), Lifecycle::Empty);
        assert_eq!(serde_json::to_string(&envelope).unwrap(), r#"{"data":[]}"#);
    }
}
