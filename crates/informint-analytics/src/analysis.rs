//! Per-post derived metrics.

use chrono::{DateTime, Utc};
use informint_core::{EngagementBenchmarks, FollowerTier, PerformanceTier, PostRecord, PostType};
use serde::Serialize;

use crate::metrics::{
    engagement_rate, follower_tier, performance_tier, reach_multiplier, roi_potential, round2,
    viral_coefficient,
};
use crate::score::ScoreBreakdown;

/// One post plus everything computed from it. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostAnalysis {
    pub post_id: Option<String>,
    pub post_url: Option<String>,
    pub post_type: Option<PostType>,
    pub creator_username: String,
    pub timestamp: Option<DateTime<Utc>>,

    pub followers: u64,
    pub following: u64,
    pub is_verified: bool,
    pub is_business_account: bool,
    pub follower_tier: FollowerTier,

    pub likes: u64,
    pub comments: u64,
    pub views: u64,
    pub total_engagement: u64,

    pub engagement_rate: f64,
    pub reach_multiplier: f64,
    pub viral_coefficient: f64,
    pub performance_score: u8,

    pub performance_tier: PerformanceTier,
    pub benchmark_min: f64,
    pub benchmark_max: f64,
    pub benchmark_label: String,
    pub above_benchmark: bool,

    pub roi_potential: u8,
    pub content_length: usize,
    pub has_hashtags: bool,
    pub has_mentions: bool,
}

impl PostAnalysis {
    /// Analyze one post against an engagement benchmark table.
    ///
    /// Tiers, score, ROI and the benchmark comparison use the unrounded
    /// rates; only the stored rate fields are rounded to two decimals.
    #[must_use]
    pub fn from_record(post: &PostRecord, benchmarks: &EngagementBenchmarks) -> Self {
        let followers = post.owner_followers_count;
        let er = engagement_rate(post.likes_count, post.comments_count, followers);
        let rm = reach_multiplier(post.video_view_count, followers);
        let vc = viral_coefficient(er, rm);
        let tier = follower_tier(followers);
        let score = ScoreBreakdown::from_parts(
            er,
            rm,
            post.owner_is_verified,
            post.owner_is_business_account,
            tier,
        )
        .total();
        let benchmark = benchmarks.for_tier(tier);

        Self {
            post_id: post.id.clone(),
            post_url: post.url.clone(),
            post_type: post.post_type,
            creator_username: post.owner_username.clone(),
            timestamp: post.timestamp,
            followers,
            following: post.owner_following_count,
            is_verified: post.owner_is_verified,
            is_business_account: post.owner_is_business_account,
            follower_tier: tier,
            likes: post.likes_count,
            comments: post.comments_count,
            views: post.video_view_count,
            total_engagement: post.likes_count.saturating_add(post.comments_count),
            engagement_rate: round2(er),
            reach_multiplier: round2(rm),
            viral_coefficient: round2(vc),
            performance_score: score,
            performance_tier: performance_tier(er),
            benchmark_min: benchmark.min,
            benchmark_max: benchmark.max,
            benchmark_label: benchmark.label.clone(),
            above_benchmark: er > benchmark.max,
            roi_potential: roi_potential(er, followers),
            content_length: post.caption.chars().count(),
            has_hashtags: post.caption.contains('#'),
            has_mentions: post.caption.contains('@'),
        }
    }
}
