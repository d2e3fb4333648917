//! Batch-level aggregation over post analyses.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use informint_core::{EngagementBenchmarks, FollowerTier, PerformanceTier};
use serde::Serialize;

use crate::analysis::PostAnalysis;
use crate::content::{content_mix, ContentMix};
use crate::insights::{generate_insights, Insight};
use crate::metrics::{clamp_score, performance_tier, reach_multiplier, round2};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total_posts: usize,
    pub total_creators: usize,
    pub avg_engagement_rate: f64,
    pub avg_performance_score: u8,
    #[serde(rename = "avgROIPotential")]
    pub avg_roi_potential: u8,

    pub total_likes: u64,
    pub total_comments: u64,
    pub total_views: u64,
    pub avg_likes: u64,
    pub avg_comments: u64,
    pub avg_views: u64,

    /// Mean views/followers over posts that have views at all.
    pub avg_reach_multiplier: f64,
    /// Total views over total followers across every post.
    pub reach_efficiency: f64,

    pub verified_creators: usize,
    /// Share of creators that are verified, in percent.
    pub verification_rate: f64,
    pub top_post: Option<TopPost>,
}

/// Post with the highest likes plus comments; the first one wins a tie.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPost {
    pub post_id: Option<String>,
    pub post_url: Option<String>,
    pub creator_username: String,
    pub total_engagement: u64,
    pub engagement_rate: f64,
}

impl From<&PostAnalysis> for TopPost {
    fn from(a: &PostAnalysis) -> Self {
        Self {
            post_id: a.post_id.clone(),
            post_url: a.post_url.clone(),
            creator_username: a.creator_username.clone(),
            total_engagement: a.total_engagement,
            engagement_rate: a.engagement_rate,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PerformanceDistribution {
    pub excellent: usize,
    pub good: usize,
    pub average: usize,
    pub poor: usize,
}

impl PerformanceDistribution {
    fn record(&mut self, tier: PerformanceTier) {
        match tier {
            PerformanceTier::Excellent => self.excellent += 1,
            PerformanceTier::Good => self.good += 1,
            PerformanceTier::Average => self.average += 1,
            PerformanceTier::Poor => self.poor += 1,
        }
    }
}

/// Aggregate over every post by one creator.
///
/// `followers`, `is_verified` and `tier` are taken from the creator's first
/// post in the batch rather than recomputed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorStats {
    pub username: String,
    pub post_count: usize,
    pub avg_engagement_rate: f64,
    pub avg_performance_score: u8,
    pub followers: u64,
    pub is_verified: bool,
    pub tier: FollowerTier,
    /// Tier of the creator's average engagement rate.
    pub performance_tier: PerformanceTier,
    pub roi_potential: u8,
}

/// Creator matrix on its own, without the rest of the batch report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorPerformance {
    pub total_creators: usize,
    pub creator_performance: Vec<CreatorStats>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub summary: BatchSummary,
    pub performance_distribution: PerformanceDistribution,
    /// Sorted by descending `avg_performance_score`; ties keep first-seen order.
    pub creator_stats: Vec<CreatorStats>,
    pub content_mix: ContentMix,
    pub insights: Vec<Insight>,
    pub detailed_analyses: Vec<PostAnalysis>,
    pub benchmarks: EngagementBenchmarks,
    pub generated_at: DateTime<Utc>,
}

#[allow(clippy::cast_precision_loss)]
fn mean<I>(values: I) -> f64
where
    I: ExactSizeIterator<Item = f64>,
{
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    values.sum::<f64>() / n as f64
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_count(value: f64) -> u64 {
    value.round().max(0.0) as u64
}

#[allow(clippy::cast_precision_loss)]
fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round2(part as f64 / whole as f64 * 100.0)
}

fn top_post(analyses: &[PostAnalysis]) -> Option<TopPost> {
    analyses
        .iter()
        .fold(None::<&PostAnalysis>, |best, a| match best {
            Some(b) if a.total_engagement <= b.total_engagement => Some(b),
            _ => Some(a),
        })
        .map(TopPost::from)
}

#[allow(clippy::cast_precision_loss)]
fn summarize(analyses: &[PostAnalysis], creators: &[CreatorStats]) -> BatchSummary {
    let total_likes: u64 = analyses.iter().map(|a| a.likes).sum();
    let total_comments: u64 = analyses.iter().map(|a| a.comments).sum();
    let total_views: u64 = analyses.iter().map(|a| a.views).sum();
    let total_followers: u64 = analyses.iter().map(|a| a.followers).sum();
    let posts = analyses.len().max(1) as f64;

    let with_views: Vec<f64> = analyses
        .iter()
        .filter(|a| a.views > 0)
        .map(|a| reach_multiplier(a.views, a.followers))
        .collect();
    let reach_efficiency = if total_followers == 0 {
        0.0
    } else {
        round2(total_views as f64 / total_followers as f64)
    };
    let verified_creators = creators.iter().filter(|c| c.is_verified).count();

    BatchSummary {
        total_posts: analyses.len(),
        total_creators: creators.len(),
        avg_engagement_rate: round2(mean(analyses.iter().map(|a| a.engagement_rate))),
        avg_performance_score: clamp_score(mean(
            analyses.iter().map(|a| f64::from(a.performance_score)),
        )),
        avg_roi_potential: clamp_score(mean(analyses.iter().map(|a| f64::from(a.roi_potential)))),
        total_likes,
        total_comments,
        total_views,
        avg_likes: round_count(total_likes as f64 / posts),
        avg_comments: round_count(total_comments as f64 / posts),
        avg_views: round_count(total_views as f64 / posts),
        avg_reach_multiplier: round2(mean(with_views.into_iter())),
        reach_efficiency,
        verified_creators,
        verification_rate: percent(verified_creators, creators.len()),
        top_post: top_post(analyses),
    }
}

/// Build the report for a non-empty list of analyses.
pub(crate) fn build_report(
    analyses: Vec<PostAnalysis>,
    benchmarks: &EngagementBenchmarks,
    generated_at: DateTime<Utc>,
) -> BatchReport {
    let mut distribution = PerformanceDistribution::default();
    for a in &analyses {
        distribution.record(a.performance_tier);
    }

    let creator_stats = creator_stats(&analyses);
    let summary = summarize(&analyses, &creator_stats);

    let mut report = BatchReport {
        summary,
        performance_distribution: distribution,
        creator_stats,
        content_mix: content_mix(&analyses),
        insights: Vec::new(),
        detailed_analyses: analyses,
        benchmarks: benchmarks.clone(),
        generated_at,
    };
    report.insights = generate_insights(&report);
    report
}

/// Group analyses by creator in first-seen order and sort by score.
#[must_use]
pub fn creator_stats(analyses: &[PostAnalysis]) -> Vec<CreatorStats> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<&PostAnalysis>> = Vec::new();

    for a in analyses {
        let slot = *index.entry(a.creator_username.as_str()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(a);
    }

    let mut stats: Vec<CreatorStats> = groups
        .into_iter()
        .filter_map(|posts| {
            let first = *posts.first()?;
            let avg_engagement_rate = round2(mean(posts.iter().map(|p| p.engagement_rate)));
            Some(CreatorStats {
                username: first.creator_username.clone(),
                post_count: posts.len(),
                avg_engagement_rate,
                avg_performance_score: clamp_score(mean(
                    posts.iter().map(|p| f64::from(p.performance_score)),
                )),
                followers: first.followers,
                is_verified: first.is_verified,
                tier: first.follower_tier,
                performance_tier: performance_tier(avg_engagement_rate),
                roi_potential: clamp_score(mean(posts.iter().map(|p| f64::from(p.roi_potential)))),
            })
        })
        .collect();

    // `sort_by` is stable, so equal scores keep insertion order.
    stats.sort_by(|a, b| b.avg_performance_score.cmp(&a.avg_performance_score));
    stats
}

pub(crate) fn build_creator_performance(
    analyses: &[PostAnalysis],
    generated_at: DateTime<Utc>,
) -> CreatorPerformance {
    let creator_performance = creator_stats(analyses);
    CreatorPerformance {
        total_creators: creator_performance.len(),
        creator_performance,
        generated_at,
    }
}
