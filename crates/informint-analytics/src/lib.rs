//! Engagement and performance analytics for scraped Instagram posts.
//!
//! Pure, synchronous pipeline: post records are analyzed one by one, the
//! analyses are aggregated into a batch report, and a small rule set turns
//! the report into qualitative insights. Nothing here performs I/O except the
//! CSV writer, which writes to a caller-supplied sink.

pub mod analysis;
pub mod batch;
pub mod content;
pub mod engagement;
pub mod error;
pub mod export;
pub mod insights;
pub mod metrics;
pub mod sample;
pub mod score;

mod engine;

pub use analysis::PostAnalysis;
pub use batch::{
    BatchReport, BatchSummary, CreatorPerformance, CreatorStats, PerformanceDistribution, TopPost,
};
pub use content::{content_mix, ContentMix};
pub use engagement::{EngagementOverview, PostEngagement};
pub use engine::AnalyticsEngine;
pub use error::{AnalyticsError, ErrorPayload};
pub use export::write_analyses_csv;
pub use insights::{generate_insights, Insight, InsightKind};
pub use sample::sample_posts;
pub use score::{performance_score, ScoreBreakdown};
