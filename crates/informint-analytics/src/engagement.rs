//! Lightweight engagement-only view over a set of posts.

use chrono::{DateTime, Utc};
use informint_core::{FollowerTier, PerformanceTier};
use serde::Serialize;

use crate::analysis::PostAnalysis;
use crate::metrics::round2;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostEngagement {
    pub post_id: Option<String>,
    pub username: String,
    pub followers: u64,
    pub likes: u64,
    pub comments: u64,
    pub views: u64,
    pub engagement_rate: f64,
    pub reach_multiplier: f64,
    pub tier: FollowerTier,
    pub performance_tier: PerformanceTier,
}

impl From<&PostAnalysis> for PostEngagement {
    fn from(a: &PostAnalysis) -> Self {
        Self {
            post_id: a.post_id.clone(),
            username: a.creator_username.clone(),
            followers: a.followers,
            likes: a.likes,
            comments: a.comments,
            views: a.views,
            engagement_rate: a.engagement_rate,
            reach_multiplier: a.reach_multiplier,
            tier: a.follower_tier,
            performance_tier: a.performance_tier,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementOverview {
    pub total_posts: usize,
    pub avg_engagement_rate: f64,
    pub engagement_data: Vec<PostEngagement>,
    pub generated_at: DateTime<Utc>,
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn build_overview(
    analyses: &[PostAnalysis],
    generated_at: DateTime<Utc>,
) -> EngagementOverview {
    let engagement_data: Vec<PostEngagement> = analyses.iter().map(PostEngagement::from).collect();
    let avg = if engagement_data.is_empty() {
        0.0
    } else {
        engagement_data.iter().map(|p| p.engagement_rate).sum::<f64>()
            / engagement_data.len() as f64
    };

    EngagementOverview {
        total_posts: engagement_data.len(),
        avg_engagement_rate: round2(avg),
        engagement_data,
        generated_at,
    }
}
