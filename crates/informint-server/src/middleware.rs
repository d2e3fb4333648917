use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::ApiError;

static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Client-supplied ids longer than this are replaced with a generated one.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Request id attached to every request as an extension and echoed back in
/// the `x-request-id` response header.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

fn accept_client_id(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let valid = !raw.is_empty()
        && raw.len() <= MAX_REQUEST_ID_LEN
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    valid.then(|| raw.to_string())
}

pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(accept_client_id)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    req.extensions_mut().insert(RequestId(id.clone()));
    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID_HEADER.clone(), val);
    }
    res
}

#[derive(Debug)]
struct Window {
    started_at: Instant,
    used: usize,
}

/// Fixed-window request budget shared by every analytics route.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    current: Arc<Mutex<Window>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self::starting_at(max_requests, window, Instant::now())
    }

    /// Limiter whose first window opens at `start`.
    fn starting_at(max_requests: usize, window: Duration, start: Instant) -> Self {
        Self {
            max_requests,
            window,
            current: Arc::new(Mutex::new(Window {
                started_at: start,
                used: 0,
            })),
        }
    }

    #[must_use]
    pub fn from_app_config(config: &informint_core::AppConfig) -> Self {
        Self::new(
            config.rate_limit_max_requests,
            Duration::from_secs(config.rate_limit_window_secs),
        )
    }

    /// Take one request from the budget at `now`.
    ///
    /// Returns the time left in the current window when the budget is spent.
    async fn try_acquire(&self, now: Instant) -> Result<(), Duration> {
        let mut current = self.current.lock().await;
        let elapsed = now.saturating_duration_since(current.started_at);
        if elapsed >= self.window {
            current.started_at = now;
            current.used = 0;
        }

        if current.used >= self.max_requests {
            return Err(self.window.saturating_sub(elapsed));
        }
        current.used += 1;
        Ok(())
    }
}

/// Reject requests over the window budget with 429 and a `retry-after` header.
pub async fn enforce_rate_limit(
    State(rate_limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    let Err(retry_after) = rate_limit.try_acquire(Instant::now()).await else {
        return next.run(req).await;
    };

    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();
    // Round up so clients never retry a fraction of a second early.
    let retry_secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);

    tracing::warn!(
        request_id = %request_id,
        max_requests = rate_limit.max_requests,
        retry_after_secs = retry_secs,
        "analytics rate limit exceeded"
    );

    let mut res = ApiError::new(
        request_id,
        "rate_limited",
        format!("too many analytics requests; retry in {retry_secs}s"),
    )
    .into_response();
    res.headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(retry_secs));
    res
}
