use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Optional YAML override for the engagement benchmark table.
    pub benchmarks_path: Option<PathBuf>,
    /// Allowed CORS origin; `*` allows any origin.
    pub cors_origin: String,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window_secs: u64,
    /// Upper bound on posts accepted in a single analytics request.
    pub max_batch_posts: usize,
}
