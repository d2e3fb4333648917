//! CSV export of analyzed posts.

use std::io::Write;

use crate::analysis::PostAnalysis;
use crate::error::AnalyticsError;

const HEADERS: [&str; 17] = [
    "Username",
    "Post ID",
    "Type",
    "Date",
    "URL",
    "Followers",
    "Likes",
    "Comments",
    "Views",
    "Engagement Rate",
    "Reach Multiplier",
    "Viral Coefficient",
    "Performance Score",
    "Performance Tier",
    "Follower Tier",
    "ROI Potential",
    "Above Benchmark",
];

/// Write one header row followed by one row per analysis.
///
/// # Errors
///
/// Returns `AnalyticsError::Csv` if a record cannot be written and
/// `AnalyticsError::Io` if the final flush fails.
pub fn write_analyses_csv<W: Write>(
    out: W,
    analyses: &[PostAnalysis],
) -> Result<(), AnalyticsError> {
    let mut wtr = csv::WriterBuilder::new().has_headers(true).from_writer(out);
    wtr.write_record(HEADERS)?;

    for a in analyses {
        wtr.write_record([
            a.creator_username.clone(),
            a.post_id.clone().unwrap_or_default(),
            a.post_type.map(|t| t.to_string()).unwrap_or_default(),
            a.timestamp
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
            a.post_url.clone().unwrap_or_default(),
            a.followers.to_string(),
            a.likes.to_string(),
            a.comments.to_string(),
            a.views.to_string(),
            a.engagement_rate.to_string(),
            a.reach_multiplier.to_string(),
            a.viral_coefficient.to_string(),
            a.performance_score.to_string(),
            a.performance_tier.to_string(),
            a.follower_tier.to_string(),
            a.roi_potential.to_string(),
            a.above_benchmark.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
