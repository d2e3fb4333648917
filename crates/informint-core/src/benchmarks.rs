//! Engagement benchmark tables and the tier enums they are keyed by.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Follower-count band a creator falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowerTier {
    Nano,
    Micro,
    Macro,
    Mega,
}

impl std::fmt::Display for FollowerTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FollowerTier::Nano => write!(f, "nano"),
            FollowerTier::Micro => write!(f, "micro"),
            FollowerTier::Macro => write!(f, "macro"),
            FollowerTier::Mega => write!(f, "mega"),
        }
    }
}

/// Engagement-rate classification of a post or creator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    Excellent,
    Good,
    Average,
    Poor,
}

impl std::fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PerformanceTier::Excellent => write!(f, "excellent"),
            PerformanceTier::Good => write!(f, "good"),
            PerformanceTier::Average => write!(f, "average"),
            PerformanceTier::Poor => write!(f, "poor"),
        }
    }
}

/// Expected engagement-rate range (percent) for one follower tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierBenchmark {
    pub min: f64,
    pub max: f64,
    pub label: String,
}

impl TierBenchmark {
    fn new(min: f64, max: f64, label: &str) -> Self {
        Self {
            min,
            max,
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementBenchmarks {
    pub nano: TierBenchmark,
    pub micro: TierBenchmark,
    pub r#macro: TierBenchmark,
    pub mega: TierBenchmark,
}

impl EngagementBenchmarks {
    #[must_use]
    pub fn for_tier(&self, tier: FollowerTier) -> &TierBenchmark {
        match tier {
            FollowerTier::Nano => &self.nano,
            FollowerTier::Micro => &self.micro,
            FollowerTier::Macro => &self.r#macro,
            FollowerTier::Mega => &self.mega,
        }
    }

    fn entries(&self) -> [(FollowerTier, &TierBenchmark); 4] {
        [
            (FollowerTier::Nano, &self.nano),
            (FollowerTier::Micro, &self.micro),
            (FollowerTier::Macro, &self.r#macro),
            (FollowerTier::Mega, &self.mega),
        ]
    }
}

impl Default for EngagementBenchmarks {
    fn default() -> Self {
        Self {
            nano: TierBenchmark::new(7.0, 9.0, "Nano (1K-10K)"),
            micro: TierBenchmark::new(3.0, 5.0, "Micro (10K-100K)"),
            r#macro: TierBenchmark::new(1.0, 3.0, "Macro (100K-1M)"),
            mega: TierBenchmark::new(0.5, 2.0, "Mega (1M+)"),
        }
    }
}

/// Display metadata for a performance tier. `min` is the engagement-rate
/// floor the tier starts at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceTierInfo {
    pub min: f64,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceTierTable {
    pub excellent: PerformanceTierInfo,
    pub good: PerformanceTierInfo,
    pub average: PerformanceTierInfo,
    pub poor: PerformanceTierInfo,
}

impl PerformanceTierTable {
    #[must_use]
    pub fn for_tier(&self, tier: PerformanceTier) -> &PerformanceTierInfo {
        match tier {
            PerformanceTier::Excellent => &self.excellent,
            PerformanceTier::Good => &self.good,
            PerformanceTier::Average => &self.average,
            PerformanceTier::Poor => &self.poor,
        }
    }
}

impl Default for PerformanceTierTable {
    fn default() -> Self {
        let info = |min: f64, label: &str, color: &str| PerformanceTierInfo {
            min,
            label: label.to_string(),
            color: color.to_string(),
        };
        Self {
            excellent: info(6.0, "Excellent", "#10B981"),
            good: info(3.0, "Good", "#3B82F6"),
            average: info(1.0, "Average", "#F59E0B"),
            poor: info(0.0, "Poor", "#EF4444"),
        }
    }
}

/// Read-only benchmark configuration held by an analytics engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benchmarks {
    pub engagement_rates: EngagementBenchmarks,
    pub performance_tiers: PerformanceTierTable,
}

#[derive(Debug, Deserialize)]
struct BenchmarksFile {
    engagement_rates: EngagementBenchmarks,
}

/// Load an engagement benchmark override from a YAML file.
///
/// Performance-tier display metadata is not overridable and keeps its defaults.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_benchmarks(path: &Path) -> Result<Benchmarks, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: BenchmarksFile = serde_yaml::from_str(&content)?;
    validate_engagement_benchmarks(&file.engagement_rates)?;

    tracing::debug!(path = %path.display(), "loaded engagement benchmark override");

    Ok(Benchmarks {
        engagement_rates: file.engagement_rates,
        performance_tiers: PerformanceTierTable::default(),
    })
}

fn validate_engagement_benchmarks(table: &EngagementBenchmarks) -> Result<(), ConfigError> {
    for (tier, bench) in table.entries() {
        if bench.label.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "benchmark label for tier '{tier}' must be non-empty"
            )));
        }

        if !bench.min.is_finite() || !bench.max.is_finite() || bench.min < 0.0 {
            return Err(ConfigError::Validation(format!(
                "benchmark range for tier '{tier}' must be finite and non-negative"
            )));
        }

        if bench.min > bench.max {
            return Err(ConfigError::Validation(format!(
                "benchmark for tier '{tier}' has min {} above max {}",
                bench.min, bench.max
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_published_ranges() {
        let b = EngagementBenchmarks::default();
        assert_eq!((b.nano.min, b.nano.max), (7.0, 9.0));
        assert_eq!((b.micro.min, b.micro.max), (3.0, 5.0));
        assert_eq!((b.r#macro.min, b.r#macro.max), (1.0, 3.0));
        assert_eq!((b.mega.min, b.mega.max), (0.5, 2.0));
        assert_eq!(b.for_tier(FollowerTier::Micro).label, "Micro (10K-100K)");
    }

    #[test]
    fn benchmarks_serialize_with_camel_case_keys() {
        let json = serde_json::to_value(Benchmarks::default()).unwrap();
        assert_eq!(json["engagementRates"]["macro"]["max"], 3.0);
        assert_eq!(json["performanceTiers"]["excellent"]["color"], "#10B981");
    }

    #[test]
    fn tiers_display_lowercase() {
        assert_eq!(FollowerTier::Mega.to_string(), "mega");
        assert_eq!(PerformanceTier::Average.to_string(), "average");
    }

    #[test]
    fn validate_rejects_inverted_range() {
        let mut table = EngagementBenchmarks::default();
        table.mega.min = 4.0;
        let err = validate_engagement_benchmarks(&table).unwrap_err();
        assert!(err.to_string().contains("tier 'mega'"));
    }

    #[test]
    fn validate_rejects_empty_label() {
        let mut table = EngagementBenchmarks::default();
        table.nano.label = " ".to_string();
        let err = validate_engagement_benchmarks(&table).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn validate_rejects_negative_min() {
        let mut table = EngagementBenchmarks::default();
        table.micro.min = -1.0;
        assert!(validate_engagement_benchmarks(&table).is_err());
    }

    #[test]
    fn load_benchmarks_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("benchmarks.yaml");
        let result = load_benchmarks(&path);
        assert!(result.is_ok(), "failed to load benchmarks.yaml: {result:?}");
        assert_eq!(result.unwrap(), Benchmarks::default());
    }

    #[test]
    fn load_benchmarks_missing_file_is_io_error() {
        let err = load_benchmarks(Path::new("/nonexistent/benchmarks.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileIo { .. }));
    }
}
