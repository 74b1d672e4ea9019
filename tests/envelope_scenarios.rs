//! Hand-built entities run through the lifecycle policy and serializer.

use chrono::Duration;
use insights_core::{
    Engagement, Lifecycle, MediaEntity, MediaKind, NavigationBreakdown, ProfileActivityBreakdown,
    ReelsWatch, RunConfig,
};
use insights_generator::classify;
use insights_json::Envelope;
use serde_json::{json, Value};

fn story(views: u64, age: Duration, config: &RunConfig) -> MediaEntity {
    MediaEntity {
        id: "31415926".to_string(),
        created_at: config.reference_instant - age,
        views,
        reach: views,
        kind: MediaKind::Story {
            shares: 0,
            replies: 0,
            navigation: NavigationBreakdown {
                tap_forward: 10,
                tap_back: 5,
                tap_exit: 1,
                swipe_forward: 10,
            },
            impressions_legacy: None,
        },
        profile_activity: ProfileActivityBreakdown::default(),
        follows: 0,
    }
}

fn render(entity: &MediaEntity, config: &RunConfig) -> String {
    let lifecycle = classify(entity, config);
    serde_json::to_string(&Envelope::for_entity(entity, lifecycle)).unwrap()
}

#[test]
fn test_low_view_story_yields_error_envelope() {
    let config = RunConfig::default();
    let entity = story(3, Duration::hours(2), &config);

    assert_eq!(classify(&entity, &config), Lifecycle::Error);
    assert_eq!(
        render(&entity, &config),
        r#"{"error":{"message":"(#10) Not enough viewers","code":10}}"#
    );
}

#[test]
fn test_low_view_highlight_story_yields_error_envelope() {
    let config = RunConfig {
        story_highlight: true,
        ..RunConfig::default()
    };
    let entity = story(3, Duration::days(10), &config);

    assert_eq!(
        render(&entity, &config),
        r#"{"error":{"message":"(#10) Not enough viewers","code":10}}"#
    );
}

#[test]
fn test_expiry_takes_precedence_over_error() {
    let config = RunConfig::default();
    for views in [0, 3, 4, 5, 200] {
        let entity = story(views, Duration::days(3), &config);
        assert_eq!(render(&entity, &config), r#"{"data":[]}"#);
    }
}

#[test]
fn test_reels_total_time_scenario() {
    let config = RunConfig::default();
    let entity = MediaEntity {
        id: "27182818".to_string(),
        created_at: config.reference_instant,
        views: 200,
        reach: 150,
        kind: MediaKind::Reels {
            engagement: Engagement {
                likes: 12,
                comments: 1,
                saved: 2,
                shares: 1,
            },
            watch: ReelsWatch::new(200, 10.0),
        },
        profile_activity: ProfileActivityBreakdown::default(),
        follows: 0,
    };

    let json: Value = serde_json::from_str(&render(&entity, &config)).unwrap();
    let total = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["name"] == "ig_reels_video_view_total_time")
        .unwrap();
    assert_eq!(
        total,
        &json!({
            "name": "ig_reels_video_view_total_time",
            "period": "lifetime",
            "values": [{"value": 2000}]
        })
    );
}
