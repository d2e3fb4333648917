//! Shared types for Informint: scraped post records, benchmark tables and
//! application configuration.

pub mod app_config;
pub mod benchmarks;
pub mod config;
pub mod posts;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use benchmarks::{
    load_benchmarks, Benchmarks, EngagementBenchmarks, FollowerTier, PerformanceTier,
    PerformanceTierInfo, PerformanceTierTable, TierBenchmark,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use posts::{load_posts, PostRecord, PostType};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse benchmarks file: {0}")]
    BenchmarksParse(#[from] serde_yaml::Error),

    #[error("failed to parse posts file {path}: {source}")]
    PostsParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("validation error: {0}")]
    Validation(String),
}
