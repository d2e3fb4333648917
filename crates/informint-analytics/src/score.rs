//! Weighted 0–100 performance score.

use informint_core::{FollowerTier, PostRecord};
use serde::Serialize;

use crate::metrics::{clamp_score, engagement_rate, follower_tier, reach_multiplier};

const ENGAGEMENT_WEIGHT: f64 = 10.0;
const ENGAGEMENT_CAP: f64 = 40.0;
const REACH_WEIGHT: f64 = 30.0;
const REACH_CAP: f64 = 30.0;
const VERIFIED_BONUS: f64 = 10.0;
const BUSINESS_BONUS: f64 = 5.0;

/// The five independently computed score components, unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub engagement: f64,
    pub reach: f64,
    pub verification: f64,
    pub business: f64,
    pub follower_quality: f64,
}

impl ScoreBreakdown {
    #[must_use]
    pub fn from_parts(
        engagement_rate: f64,
        reach_multiplier: f64,
        is_verified: bool,
        is_business: bool,
        tier: FollowerTier,
    ) -> Self {
        Self {
            engagement: (engagement_rate * ENGAGEMENT_WEIGHT).min(ENGAGEMENT_CAP),
            reach: (reach_multiplier * REACH_WEIGHT).min(REACH_CAP),
            verification: if is_verified { VERIFIED_BONUS } else { 0.0 },
            business: if is_business { BUSINESS_BONUS } else { 0.0 },
            follower_quality: follower_quality(tier),
        }
    }

    /// Sum of the components, rounded once and clamped to `[0, 100]`.
    #[must_use]
    pub fn total(&self) -> u8 {
        clamp_score(
            self.engagement + self.reach + self.verification + self.business + self.follower_quality,
        )
    }
}

/// Smaller audiences tend to engage more, so they earn a larger bonus.
fn follower_quality(tier: FollowerTier) -> f64 {
    match tier {
        FollowerTier::Nano => 15.0,
        FollowerTier::Micro => 12.0,
        FollowerTier::Macro => 8.0,
        FollowerTier::Mega => 5.0,
    }
}

/// Compute the performance score of a single post.
#[must_use]
pub fn performance_score(post: &PostRecord) -> u8 {
    let followers = post.owner_followers_count;
    ScoreBreakdown::from_parts(
        engagement_rate(post.likes_count, post.comments_count, followers),
        reach_multiplier(post.video_view_count, followers),
        post.owner_is_verified,
        post.owner_is_business_account,
        follower_tier(followers),
    )
    .total()
}
