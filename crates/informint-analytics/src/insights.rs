//! Rule-based qualitative findings over a batch report.

use serde::Serialize;

use crate::batch::BatchReport;

const EXCELLENT_ENGAGEMENT: f64 = 5.0;
const LOW_ENGAGEMENT: f64 = 2.0;
const TOP_PERFORMER_ENGAGEMENT: f64 = 5.0;
const HIGH_ROI: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Success,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
    pub recommendation: String,
}

impl Insight {
    fn new(kind: InsightKind, title: &str, message: String, recommendation: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message,
            recommendation: recommendation.to_string(),
        }
    }
}

/// Evaluate every insight rule against `report`.
///
/// Rules are independent; each one that applies contributes one insight, in
/// a fixed order: overall engagement, top performer, high-ROI creators.
#[must_use]
pub fn generate_insights(report: &BatchReport) -> Vec<Insight> {
    let mut insights = Vec::new();
    let avg = report.summary.avg_engagement_rate;

    if avg > EXCELLENT_ENGAGEMENT {
        insights.push(Insight::new(
            InsightKind::Success,
            "Excellent Engagement",
            format!("Average engagement rate of {avg}% is above industry standards."),
            "Continue current content strategy and consider scaling partnerships.",
        ));
    }

    if avg < LOW_ENGAGEMENT {
        insights.push(Insight::new(
            InsightKind::Warning,
            "Low Engagement",
            format!("Average engagement rate of {avg}% is below industry benchmarks."),
            "Focus on smaller creators with higher engagement rates for better ROI.",
        ));
    }

    if let Some(top) = report
        .creator_stats
        .first()
        .filter(|c| c.avg_engagement_rate > TOP_PERFORMER_ENGAGEMENT)
    {
        insights.push(Insight::new(
            InsightKind::Info,
            "Top Performer",
            format!(
                "@{} shows exceptional engagement ({}%).",
                top.username, top.avg_engagement_rate
            ),
            "Consider prioritizing partnerships with this creator.",
        ));
    }

    let high_roi = report
        .creator_stats
        .iter()
        .filter(|c| c.roi_potential > HIGH_ROI)
        .count();
    if high_roi > 0 {
        insights.push(Insight::new(
            InsightKind::Success,
            "High ROI Opportunities",
            format!("{high_roi} creators show high ROI potential (>{HIGH_ROI}%)."),
            "These creators offer cost-effective partnership opportunities.",
        ));
    }

    tracing::debug!(count = insights.len(), "generated insights");
    insights
}
