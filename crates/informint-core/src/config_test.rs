use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "INFORMINT_ENV"));
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults are valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.benchmarks_path.is_none());
    assert_eq!(cfg.cors_origin, "*");
    assert_eq!(cfg.rate_limit_max_requests, 100);
    assert_eq!(cfg.rate_limit_window_secs, 900);
    assert_eq!(cfg.max_batch_posts, 1000);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("INFORMINT_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INFORMINT_BIND_ADDR"),
        "expected InvalidEnvVar(INFORMINT_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("INFORMINT_ENV", "production");
    map.insert("INFORMINT_BIND_ADDR", "127.0.0.1:8080");
    map.insert("INFORMINT_LOG_LEVEL", "debug");
    map.insert("INFORMINT_BENCHMARKS_PATH", "./config/benchmarks.yaml");
    map.insert("INFORMINT_CORS_ORIGIN", "https://dash.example.com");
    map.insert("INFORMINT_RATE_LIMIT_MAX_REQUESTS", "20");
    map.insert("INFORMINT_RATE_LIMIT_WINDOW_SECS", "60");
    map.insert("INFORMINT_MAX_BATCH_POSTS", "250");

    let cfg = build_app_config(lookup_from_map(&map)).expect("overrides are valid");
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:8080");
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(
        cfg.benchmarks_path.as_deref(),
        Some(std::path::Path::new("./config/benchmarks.yaml"))
    );
    assert_eq!(cfg.cors_origin, "https://dash.example.com");
    assert_eq!(cfg.rate_limit_max_requests, 20);
    assert_eq!(cfg.rate_limit_window_secs, 60);
    assert_eq!(cfg.max_batch_posts, 250);
}

#[test]
fn blank_benchmarks_path_is_treated_as_unset() {
    let mut map = HashMap::new();
    map.insert("INFORMINT_BENCHMARKS_PATH", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.benchmarks_path.is_none());
}

#[test]
fn max_batch_posts_invalid() {
    let mut map = HashMap::new();
    map.insert("INFORMINT_MAX_BATCH_POSTS", "lots");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INFORMINT_MAX_BATCH_POSTS"),
        "expected InvalidEnvVar(INFORMINT_MAX_BATCH_POSTS), got: {result:?}"
    );
}

#[test]
fn max_batch_posts_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("INFORMINT_MAX_BATCH_POSTS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INFORMINT_MAX_BATCH_POSTS"),
        "expected InvalidEnvVar(INFORMINT_MAX_BATCH_POSTS), got: {result:?}"
    );
}

#[test]
fn rate_limit_window_invalid() {
    let mut map = HashMap::new();
    map.insert("INFORMINT_RATE_LIMIT_WINDOW_SECS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INFORMINT_RATE_LIMIT_WINDOW_SECS"),
        "expected InvalidEnvVar(INFORMINT_RATE_LIMIT_WINDOW_SECS), got: {result:?}"
    );
}

#[test]
fn rate_limit_window_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("INFORMINT_RATE_LIMIT_WINDOW_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, ref reason }) if var == "INFORMINT_RATE_LIMIT_WINDOW_SECS" && reason.contains("greater than zero")),
        "expected zero window to be rejected, got: {result:?}"
    );
}
