//! Entity synthesizer.
//!
//! Draws one [`MediaEntity`] from the pseudo-random stream. The order of
//! draws below is fixed: every value of every later entity depends on it, so
//! reordering, adding or skipping a draw changes the whole corpus for a seed.

use crate::rng::{rand_float, rand_int, UnitSource};
use chrono::Duration;
use insights_core::{
    round_half_up, Engagement, MediaEntity, MediaKind, MediaType, NavigationBreakdown,
    ProfileActivityBreakdown, ReelsWatch, RunConfig,
};

const ID_MIN: u64 = 10_000_000;
const ID_MAX: u64 = 99_999_999;
const MAX_AGE_DAYS: u64 = 59;

fn draw_media_type<S: UnitSource + ?Sized>(rng: &mut S) -> MediaType {
    let type_rand = rng.next_unit();
    if type_rand < 0.5 {
        MediaType::Feed
    } else if type_rand < 0.8 {
        MediaType::Reels
    } else {
        MediaType::Story
    }
}

/// Draw an entity id in `10000000..=99999999`.
pub(crate) fn draw_id<S: UnitSource + ?Sized>(rng: &mut S) -> String {
    rand_int(rng, ID_MIN, ID_MAX).to_string()
}

fn draw_engagement<S: UnitSource + ?Sized>(rng: &mut S, reach: u64) -> Engagement {
    let likes = round_half_up(reach as f64 * rand_float(rng, 0.06, 0.12));
    let comments = round_half_up(likes as f64 * rand_float(rng, 0.07, 0.12));
    let saved = round_half_up(likes as f64 * rand_float(rng, 0.10, 0.18));
    let shares = round_half_up(likes as f64 * rand_float(rng, 0.05, 0.10));
    Engagement {
        likes,
        comments,
        saved,
        shares,
    }
}

fn draw_navigation<S: UnitSource + ?Sized>(rng: &mut S) -> NavigationBreakdown {
    NavigationBreakdown {
        tap_forward: rand_int(rng, 10, 30),
        tap_back: rand_int(rng, 5, 15),
        tap_exit: rand_int(rng, 1, 5),
        swipe_forward: rand_int(rng, 10, 25),
    }
}

fn draw_profile_activity<S: UnitSource + ?Sized>(rng: &mut S) -> ProfileActivityBreakdown {
    ProfileActivityBreakdown {
        bio_link_clicked: rand_int(rng, 0, 5),
        call: rand_int(rng, 0, 3),
        direction: rand_int(rng, 0, 3),
        email: rand_int(rng, 0, 3),
        other: rand_int(rng, 0, 2),
        text: rand_int(rng, 0, 2),
    }
}

/// Type-specific fields drawn before the shared profile activity block.
enum Draft {
    Feed(Engagement),
    Reels(Engagement, ReelsWatch),
    Story {
        shares: u64,
        replies: u64,
        navigation: NavigationBreakdown,
    },
}

/// Synthesize the next entity from the stream.
pub fn synthesize<S: UnitSource + ?Sized>(rng: &mut S, config: &RunConfig) -> MediaEntity {
    let media_type = draw_media_type(rng);
    let id = draw_id(rng);

    let age_days = rand_int(rng, 0, MAX_AGE_DAYS);
    let created_at = config.reference_instant - Duration::days(age_days as i64);

    let views = rand_int(rng, 120, 250);
    let reach = round_half_up(views as f64 * rand_float(rng, 0.65, 0.9));

    let draft = match media_type {
        MediaType::Feed => Draft::Feed(draw_engagement(rng, reach)),
        MediaType::Reels => {
            let engagement = draw_engagement(rng, reach);
            let watch = ReelsWatch::new(views, rand_float(rng, 6.0, 18.0));
            Draft::Reels(engagement, watch)
        }
        MediaType::Story => {
            let shares = round_half_up(reach as f64 * rand_float(rng, 0.01, 0.03));
            // Suppressed regions take no draw for replies.
            let replies = if config.region.suppresses_story_replies() {
                0
            } else {
                round_half_up(reach as f64 * rand_float(rng, 0.005, 0.02))
            };
            Draft::Story {
                shares,
                replies,
                navigation: draw_navigation(rng),
            }
        }
    };

    let profile_activity = draw_profile_activity(rng);
    let follows = rand_int(rng, 0, 5);

    let impressions_legacy = (created_at <= config.legacy_cutoff
        && matches!(media_type, MediaType::Feed | MediaType::Story))
    .then(|| rand_int(rng, views, round_half_up(views as f64 * 1.1)));

    let kind = match draft {
        Draft::Feed(engagement) => MediaKind::Feed {
            engagement,
            impressions_legacy,
        },
        Draft::Reels(engagement, watch) => MediaKind::Reels { engagement, watch },
        Draft::Story {
            shares,
            replies,
            navigation,
        } => MediaKind::Story {
            shares,
            replies,
            navigation,
            impressions_legacy,
        },
    };

    MediaEntity {
        id,
        created_at,
        views,
        reach,
        kind,
        profile_activity,
        follows,
    }
}
