use chrono::{DateTime, Utc};
use informint_core::{Benchmarks, PostRecord};

use crate::analysis::PostAnalysis;
use crate::batch::{build_creator_performance, build_report, BatchReport, CreatorPerformance};
use crate::engagement::{build_overview, EngagementOverview};
use crate::error::AnalyticsError;

/// Analytics entry point. Holds the read-only benchmark tables; every
/// method is a pure function of its input and those tables, so one engine
/// can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    benchmarks: Benchmarks,
}

impl AnalyticsEngine {
    #[must_use]
    pub fn new(benchmarks: Benchmarks) -> Self {
        Self { benchmarks }
    }

    #[must_use]
    pub fn benchmarks(&self) -> &Benchmarks {
        &self.benchmarks
    }

    #[must_use]
    pub fn analyze_post(&self, post: &PostRecord) -> PostAnalysis {
        PostAnalysis::from_record(post, &self.benchmarks.engagement_rates)
    }

    #[must_use]
    pub fn analyze_posts(&self, posts: &[PostRecord]) -> Vec<PostAnalysis> {
        posts.iter().map(|p| self.analyze_post(p)).collect()
    }

    /// Analyze a batch and aggregate it into a report stamped with the
    /// current time.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::NoValidData` if `posts` is empty.
    pub fn analyze_batch(&self, posts: &[PostRecord]) -> Result<BatchReport, AnalyticsError> {
        self.analyze_batch_at(posts, Utc::now())
    }

    /// Same as [`Self::analyze_batch`] with an explicit `generated_at`, so
    /// identical input yields an identical report.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::NoValidData` if `posts` is empty.
    pub fn analyze_batch_at(
        &self,
        posts: &[PostRecord],
        generated_at: DateTime<Utc>,
    ) -> Result<BatchReport, AnalyticsError> {
        if posts.is_empty() {
            return Err(AnalyticsError::NoValidData);
        }

        let analyses = self.analyze_posts(posts);
        let report = build_report(analyses, &self.benchmarks.engagement_rates, generated_at);

        tracing::debug!(
            posts = report.summary.total_posts,
            creators = report.summary.total_creators,
            avg_engagement_rate = report.summary.avg_engagement_rate,
            insights = report.insights.len(),
            "analyzed batch"
        );
        Ok(report)
    }

    /// Per-post engagement and reach without the full batch aggregation.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::NoValidData` if `posts` is empty.
    pub fn engagement_overview(
        &self,
        posts: &[PostRecord],
    ) -> Result<EngagementOverview, AnalyticsError> {
        if posts.is_empty() {
            return Err(AnalyticsError::NoValidData);
        }
        Ok(build_overview(&self.analyze_posts(posts), Utc::now()))
    }

    /// Creators ranked by average performance score, each with the tier of
    /// their average engagement rate.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::NoValidData` if `posts` is empty.
    pub fn creator_performance(
        &self,
        posts: &[PostRecord],
    ) -> Result<CreatorPerformance, AnalyticsError> {
        if posts.is_empty() {
            return Err(AnalyticsError::NoValidData);
        }
        Ok(build_creator_performance(&self.analyze_posts(posts), Utc::now()))
    }
}
