mod api;
mod middleware;

use std::sync::Arc;

use informint_analytics::AnalyticsEngine;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, build_cors, AppState},
    middleware::RateLimitState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = informint_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let benchmarks = match &config.benchmarks_path {
        Some(path) => informint_core::load_benchmarks(path)?,
        None => informint_core::Benchmarks::default(),
    };

    let state = AppState {
        engine: Arc::new(AnalyticsEngine::new(benchmarks)),
        max_batch_posts: config.max_batch_posts,
    };
    let app = build_app(
        state,
        RateLimitState::from_app_config(&config),
        build_cors(&config.cors_origin)?,
    );

    tracing::info!(
        env = %config.env,
        bind_addr = %config.bind_addr,
        max_batch_posts = config.max_batch_posts,
        "starting informint server"
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
