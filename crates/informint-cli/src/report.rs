//! Command handlers that run the analytics engine over a posts file.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use informint_analytics::{
    write_analyses_csv, AnalyticsEngine, CreatorStats, EngagementOverview, ErrorPayload,
};
use informint_core::Benchmarks;

fn load(path: &Path) -> anyhow::Result<Vec<informint_core::PostRecord>> {
    let posts = informint_core::load_posts(path)?;
    tracing::info!(path = %path.display(), count = posts.len(), "loaded posts");
    Ok(posts)
}

/// Print the batch report as JSON.
///
/// An empty posts file prints the `{"error": ...}` payload instead of a
/// report, so downstream tooling can branch on the `error` key.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the output cannot be serialized.
pub(crate) fn run_analyze(
    engine: &AnalyticsEngine,
    path: &Path,
    pretty: bool,
) -> anyhow::Result<()> {
    let posts = load(path)?;
    let json = match engine.analyze_batch(&posts) {
        Ok(report) => to_json(&report, pretty)?,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "no analytics produced");
            to_json(&ErrorPayload::from(&e), pretty)?
        }
    };
    println!("{json}");
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

/// Print a fixed-width engagement table.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or contains no posts.
pub(crate) fn run_engagement(engine: &AnalyticsEngine, path: &Path) -> anyhow::Result<()> {
    let posts = load(path)?;
    let overview = engine.engagement_overview(&posts)?;
    let mut table = String::new();
    write_engagement_table(&mut table, &overview)?;
    print!("{table}");
    Ok(())
}

/// Print creators ranked by average performance score.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or contains no posts.
pub(crate) fn run_creators(engine: &AnalyticsEngine, path: &Path) -> anyhow::Result<()> {
    let posts = load(path)?;
    let matrix = engine.creator_performance(&posts)?;
    let mut table = String::new();
    write_creator_table(&mut table, &matrix.creator_performance)?;
    print!("{table}");
    Ok(())
}

/// Write analyzed posts as CSV to `out`, or stdout when `out` is `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded, has no posts, or the
/// output cannot be written.
pub(crate) fn run_export(
    engine: &AnalyticsEngine,
    path: &Path,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let posts = load(path)?;
    if posts.is_empty() {
        anyhow::bail!("no posts in {}; nothing to export", path.display());
    }
    let analyses = engine.analyze_posts(&posts);

    match out {
        Some(out_path) => {
            let file = File::create(out_path)
                .with_context(|| format!("failed to create {}", out_path.display()))?;
            write_analyses_csv(BufWriter::new(file), &analyses)?;
            println!("exported {} posts to {}", analyses.len(), out_path.display());
        }
        None => {
            let stdout = io::stdout();
            write_analyses_csv(stdout.lock(), &analyses)?;
        }
    }
    Ok(())
}

/// Print the benchmark tables in force.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub(crate) fn run_benchmarks(engine: &AnalyticsEngine) -> anyhow::Result<()> {
    let mut listing = String::new();
    write_benchmarks(&mut listing, engine.benchmarks())?;
    io::stdout().lock().write_all(listing.as_bytes())?;
    Ok(())
}

pub(crate) fn write_engagement_table(
    out: &mut impl fmt::Write,
    overview: &EngagementOverview,
) -> fmt::Result {
    writeln!(
        out,
        "{:<24}{:>12}{:>10}{:>10}{:>10}  {:<8}PERFORMANCE",
        "CREATOR", "FOLLOWERS", "ER %", "REACH", "VIEWS", "TIER"
    )?;
    for p in &overview.engagement_data {
        writeln!(
            out,
            "{:<24}{:>12}{:>10.2}{:>10.2}{:>10}  {:<8}{}",
            p.username,
            p.followers,
            p.engagement_rate,
            p.reach_multiplier,
            p.views,
            p.tier.to_string(),
            p.performance_tier
        )?;
    }
    writeln!(
        out,
        "\n{} posts, average engagement {:.2}%",
        overview.total_posts, overview.avg_engagement_rate
    )
}

pub(crate) fn write_creator_table(
    out: &mut impl fmt::Write,
    creators: &[CreatorStats],
) -> fmt::Result {
    writeln!(
        out,
        "{:<24}{:>7}{:>10}{:>8}{:>6}{:>12}  {:<12}TIER",
        "CREATOR", "POSTS", "AVG ER %", "SCORE", "ROI", "FOLLOWERS", "PERFORMANCE"
    )?;
    for c in creators {
        // `*` marks verified accounts
        let verified = if c.is_verified { " *" } else { "" };
        writeln!(
            out,
            "{:<24}{:>7}{:>10.2}{:>8}{:>6}{:>12}  {:<12}{}{}",
            c.username,
            c.post_count,
            c.avg_engagement_rate,
            c.avg_performance_score,
            c.roi_potential,
            c.followers,
            c.performance_tier.to_string(),
            c.tier,
            verified
        )?;
    }
    Ok(())
}

pub(crate) fn write_benchmarks(
    out: &mut impl fmt::Write,
    benchmarks: &Benchmarks,
) -> fmt::Result {
    use informint_core::{FollowerTier, PerformanceTier};

    writeln!(out, "ENGAGEMENT BENCHMARKS")?;
    for tier in [
        FollowerTier::Nano,
        FollowerTier::Micro,
        FollowerTier::Macro,
        FollowerTier::Mega,
    ] {
        let b = benchmarks.engagement_rates.for_tier(tier);
        writeln!(
            out,
            "  {:<8}{:>6}% - {:>4}%  {}",
            tier.to_string(),
            b.min,
            b.max,
            b.label
        )?;
    }
    writeln!(out, "\nPERFORMANCE TIERS")?;
    for tier in [
        PerformanceTier::Excellent,
        PerformanceTier::Good,
        PerformanceTier::Average,
        PerformanceTier::Poor,
    ] {
        let info = benchmarks.performance_tiers.for_tier(tier);
        writeln!(out, "  {:<10} >= {}%", info.label, info.min)?;
    }
    Ok(())
}
