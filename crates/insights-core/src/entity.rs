//! The synthesized media entity.
//!
//! Fields that only exist for some media types live inside the [`MediaKind`]
//! variant for that type, so an entity can never carry fields belonging to a
//! type it is not. Totals are computed from their breakdowns rather than
//! stored, which keeps `total == sum(breakdown)` true by construction.

use crate::types::MediaType;
use chrono::{DateTime, Duration, Utc};

/// Round a non-negative value half-up (`floor(x + 0.5)`).
///
/// Every rounded metric goes through this helper so that generated fixtures
/// stay comparable with implementations using the same rounding rule.
pub fn round_half_up(value: f64) -> u64 {
    let rounded = (value + 0.5).floor();
    if rounded <= 0.0 {
        0
    } else {
        rounded as u64
    }
}

/// Engagement counters shared by feed posts and reels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engagement {
    pub likes: u64,
    pub comments: u64,
    pub saved: u64,
    pub shares: u64,
}

/// Story navigation counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationBreakdown {
    pub tap_forward: u64,
    pub tap_back: u64,
    pub tap_exit: u64,
    pub swipe_forward: u64,
}

impl NavigationBreakdown {
    pub fn total(&self) -> u64 {
        self.entries().iter().map(|(_, v)| v).sum()
    }

    /// Counters keyed by their upstream action names, in emission order.
    pub fn entries(&self) -> [(&'static str, u64); 4] {
        [
            ("TAP_FORWARD", self.tap_forward),
            ("TAP_BACK", self.tap_back),
            ("TAP_EXIT", self.tap_exit),
            ("SWIPE_FORWARD", self.swipe_forward),
        ]
    }
}

/// Profile activity counters, present on every entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileActivityBreakdown {
    pub bio_link_clicked: u64,
    pub call: u64,
    pub direction: u64,
    pub email: u64,
    pub other: u64,
    pub text: u64,
}

impl ProfileActivityBreakdown {
    pub fn total(&self) -> u64 {
        self.entries().iter().map(|(_, v)| v).sum()
    }

    /// Counters keyed by their upstream action names, in emission order.
    pub fn entries(&self) -> [(&'static str, u64); 6] {
        [
            ("BIO_LINK_CLICKED", self.bio_link_clicked),
            ("CALL", self.call),
            ("DIRECTION", self.direction),
            ("EMAIL", self.email),
            ("OTHER", self.other),
            ("TEXT", self.text),
        ]
    }
}

/// Watch-time metrics, present only on reels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReelsWatch {
    /// Average watch time in seconds
    pub avg_watch_time: f64,
    /// `round(views * avg_watch_time)`
    pub video_view_total_time: u64,
}

impl ReelsWatch {
    pub fn new(views: u64, avg_watch_time: f64) -> Self {
        Self {
            avg_watch_time,
            video_view_total_time: round_half_up(views as f64 * avg_watch_time),
        }
    }
}

/// Type-specific fields of an entity.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaKind {
    Feed {
        engagement: Engagement,
        impressions_legacy: Option<u64>,
    },
    Reels {
        engagement: Engagement,
        watch: ReelsWatch,
    },
    Story {
        shares: u64,
        replies: u64,
        navigation: NavigationBreakdown,
        impressions_legacy: Option<u64>,
    },
}

impl MediaKind {
    pub fn media_type(&self) -> MediaType {
        match self {
            MediaKind::Feed { .. } => MediaType::Feed,
            MediaKind::Reels { .. } => MediaType::Reels,
            MediaKind::Story { .. } => MediaType::Story,
        }
    }
}

/// One synthesized media record.
///
/// Entities are created once, classified, serialized and dropped; nothing
/// mutates them after synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEntity {
    /// Numeric-string identifier, unique within a run
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub views: u64,
    pub reach: u64,
    pub kind: MediaKind,
    pub profile_activity: ProfileActivityBreakdown,
    pub follows: u64,
}

impl MediaEntity {
    pub fn media_type(&self) -> MediaType {
        self.kind.media_type()
    }

    /// Time elapsed between creation and the given reference instant.
    pub fn age_at(&self, reference: DateTime<Utc>) -> Duration {
        reference - self.created_at
    }

    pub fn engagement(&self) -> Option<&Engagement> {
        match &self.kind {
            MediaKind::Feed { engagement, .. } | MediaKind::Reels { engagement, .. } => {
                Some(engagement)
            }
            MediaKind::Story { .. } => None,
        }
    }

    /// Shares exist for every type, but are drawn differently for stories.
    pub fn shares(&self) -> u64 {
        match &self.kind {
            MediaKind::Feed { engagement, .. } | MediaKind::Reels { engagement, .. } => {
                engagement.shares
            }
            MediaKind::Story { shares, .. } => *shares,
        }
    }

    pub fn replies(&self) -> Option<u64> {
        match &self.kind {
            MediaKind::Story { replies, .. } => Some(*replies),
            _ => None,
        }
    }

    pub fn navigation(&self) -> Option<&NavigationBreakdown> {
        match &self.kind {
            MediaKind::Story { navigation, .. } => Some(navigation),
            _ => None,
        }
    }

    pub fn reels_watch(&self) -> Option<&ReelsWatch> {
        match &self.kind {
            MediaKind::Reels { watch, .. } => Some(watch),
            _ => None,
        }
    }

    pub fn impressions_legacy(&self) -> Option<u64> {
        match &self.kind {
            MediaKind::Feed {
                impressions_legacy, ..
            }
            | MediaKind::Story {
                impressions_legacy, ..
            } => *impressions_legacy,
            MediaKind::Reels { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn story(views: u64) -> MediaEntity {
        MediaEntity {
            id: "12345678".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 8, 10, 12, 0, 0).unwrap(),
            views,
            reach: views,
            kind: MediaKind::Story {
                shares: 2,
                replies: 1,
                navigation: NavigationBreakdown {
                    tap_forward: 12,
                    tap_back: 6,
                    tap_exit: 3,
                    swipe_forward: 20,
                },
                impressions_legacy: None,
            },
            profile_activity: ProfileActivityBreakdown::default(),
            follows: 0,
        }
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.4999), 2);
        assert_eq!(round_half_up(0.0), 0);
        assert_eq!(round_half_up(149.5), 150);
    }

    #[test]
    fn test_breakdown_totals() {
        let nav = NavigationBreakdown {
            tap_forward: 12,
            tap_back: 6,
            tap_exit: 3,
            swipe_forward: 20,
        };
        assert_eq!(nav.total(), 41);

        let activity = ProfileActivityBreakdown {
            bio_link_clicked: 5,
            call: 1,
            direction: 2,
            email: 0,
            other: 2,
            text: 1,
        };
        assert_eq!(activity.total(), 11);
        assert_eq!(activity.entries()[0], ("BIO_LINK_CLICKED", 5));
    }

    #[test]
    fn test_reels_watch_total_time() {
        let watch = ReelsWatch::new(200, 10.0);
        assert_eq!(watch.video_view_total_time, 2000);

        let watch = ReelsWatch::new(150, 7.25);
        assert_eq!(watch.video_view_total_time, 1088);
    }

    #[test]
    fn test_story_accessors() {
        let entity = story(140);
        assert_eq!(entity.media_type(), MediaType::Story);
        assert!(entity.engagement().is_none());
        assert!(entity.reels_watch().is_none());
        assert_eq!(entity.shares(), 2);
        assert_eq!(entity.replies(), Some(1));
        assert_eq!(entity.navigation().map(|n| n.total()), Some(41));
    }

    #[test]
    fn test_age_at() {
        let entity = story(140);
        let reference = Utc.with_ymd_and_hms(2024, 8, 15, 12, 0, 0).unwrap();
        assert_eq!(entity.age_at(reference), Duration::days(5));
    }
}
