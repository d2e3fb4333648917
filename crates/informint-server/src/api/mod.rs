mod analytics;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use informint_analytics::AnalyticsEngine;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AnalyticsEngine>,
    pub max_batch_posts: usize,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" | "no_valid_data" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Build the CORS layer for the configured origin; `*` allows any origin.
///
/// # Errors
///
/// Returns an error if `origin` is not a valid header value.
pub fn build_cors(origin: &str) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-request-id"),
        ]);

    if origin.trim() == "*" {
        return Ok(layer.allow_origin(tower_http::cors::Any));
    }

    let value = HeaderValue::from_str(origin.trim())
        .map_err(|e| anyhow::anyhow!("invalid CORS origin '{origin}': {e}"))?;
    Ok(layer.allow_origin(value))
}

fn analytics_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/analytics", post(analytics::analyze_batch))
        .route("/api/v1/analytics/sample", get(analytics::analyze_sample))
        .route(
            "/api/v1/analytics/engagement",
            post(analytics::engagement_overview),
        )
        .route(
            "/api/v1/analytics/creators",
            post(analytics::creator_performance),
        )
        .route(
            "/api/v1/analytics/benchmarks",
            get(analytics::get_benchmarks),
        )
        .route("/api/v1/analytics/export", post(analytics::export_csv))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState, cors: CorsLayer) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(analytics_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData { status: "ok" },
            meta: ResponseMeta::new(req_id.0),
        }),
    )
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_app_with(max_batch_posts: usize, rate_limit: RateLimitState) -> Router {
        build_app(
            AppState {
                engine: Arc::new(AnalyticsEngine::default()),
                max_batch_posts,
            },
            rate_limit,
            build_cors("*").expect("cors"),
        )
    }

    fn test_app() -> Router {
        test_app_with(100, RateLimitState::new(1_000, Duration::from_secs(60)))
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).expect("request")
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&body).expect("json parse")
    }

    fn sample_body() -> Value {
        json!({
            "data": [
                {"id": "p1", "ownerUsername": "creator1", "ownerFollowersCount": 25000,
                 "likesCount": 1500, "commentsCount": 45, "videoViewCount": 8000,
                 "ownerIsVerified": true, "type": "Video"},
                {"id": "p2", "ownerUsername": "creator2", "ownerFollowersCount": 15000,
                 "likesCount": 800, "commentsCount": 32, "videoViewCount": null,
                 "type": "Image"}
            ]
        })
    }

    #[test]
    fn api_error_no_valid_data_maps_to_bad_request() {
        let response = ApiError::new("req-1", "no_valid_data", "empty").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn build_cors_rejects_invalid_origin() {
        assert!(build_cors("bad\norigin").is_err());
        assert!(build_cors("https://dash.example.com").is_ok());
    }

    #[tokio::test]
    async fn health_returns_ok_and_echoes_request_id() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header("x-request-id", "req-abc")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
            Some("req-abc")
        );
        let json = body_json(response).await;
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["meta"]["request_id"], "req-abc");
    }

    #[tokio::test]
    async fn analyze_batch_returns_report() {
        let response = test_app()
            .oneshot(post_json("/api/v1/analytics", &sample_body()))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["summary"]["totalPosts"], 2);
        assert_eq!(json["data"]["creatorStats"][0]["username"], "creator1");
        assert_eq!(json["data"]["detailedAnalyses"][0]["engagementRate"], 6.18);
        assert_eq!(json["data"]["summary"]["totalLikes"], 2300);
        assert_eq!(json["data"]["summary"]["verificationRate"], 50.0);
        assert_eq!(json["data"]["summary"]["topPost"]["postId"], "p1");
    }

    #[tokio::test]
    async fn analyze_batch_rejects_empty_data() {
        let response = test_app()
            .oneshot(post_json("/api/v1/analytics", &json!({"data": []})))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "no_valid_data");
        assert_eq!(json["error"]["message"], "No valid posts data provided");
    }

    #[tokio::test]
    async fn analyze_batch_rejects_missing_data_key() {
        let response = test_app()
            .oneshot(post_json("/api/v1/analytics", &json!({})))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn analyze_batch_rejects_oversized_batch() {
        let app = test_app_with(1, RateLimitState::new(1_000, Duration::from_secs(60)));
        let response = app
            .oneshot(post_json("/api/v1/analytics", &sample_body()))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/analytics")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "bad_request");
    }

    #[tokio::test]
    async fn sample_endpoint_analyzes_builtin_batch() {
        let response = test_app()
            .oneshot(get("/api/v1/analytics/sample"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["summary"]["totalPosts"], 3);
        assert_eq!(json["data"]["insights"][0]["title"], "Excellent Engagement");
    }

    #[tokio::test]
    async fn engagement_endpoint_lists_posts() {
        let response = test_app()
            .oneshot(post_json("/api/v1/analytics/engagement", &sample_body()))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["totalPosts"], 2);
        assert_eq!(json["data"]["engagementData"][1]["performanceTier"], "good");
    }

    #[tokio::test]
    async fn creators_endpoint_ranks_creators_with_tiers() {
        let response = test_app()
            .oneshot(post_json("/api/v1/analytics/creators", &sample_body()))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["totalCreators"], 2);
        let first = &json["data"]["creatorPerformance"][0];
        assert_eq!(first["username"], "creator1");
        assert_eq!(first["tier"], "micro");
        assert_eq!(first["performanceTier"], "excellent");
        assert_eq!(
            json["data"]["creatorPerformance"][1]["performanceTier"],
            "good"
        );
    }

    #[tokio::test]
    async fn creators_endpoint_rejects_empty_data() {
        let response = test_app()
            .oneshot(post_json("/api/v1/analytics/creators", &json!({"data": []})))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "no_valid_data");
    }

    #[tokio::test]
    async fn benchmarks_endpoint_returns_tables() {
        let response = test_app()
            .oneshot(get("/api/v1/analytics/benchmarks"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["engagementRates"]["nano"]["min"], 7.0);
        assert_eq!(json["data"]["performanceTiers"]["poor"]["label"], "Poor");
    }

    #[tokio::test]
    async fn export_endpoint_returns_csv_attachment() {
        let response = test_app()
            .oneshot(post_json("/api/v1/analytics/export", &sample_body()))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("text/csv; charset=utf-8")
        );
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let text = String::from_utf8(body.to_vec()).expect("utf8");
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("Username,"));
    }

    #[tokio::test]
    async fn rate_limit_rejects_requests_past_the_window_budget() {
        let app = test_app_with(100, RateLimitState::new(1, Duration::from_secs(60)));

        let first = app
            .clone()
            .oneshot(get("/api/v1/analytics/benchmarks"))
            .await
            .expect("response");
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .oneshot(get("/api/v1/analytics/benchmarks"))
            .await
            .expect("response");
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(second.headers().contains_key(header::RETRY_AFTER));
        let json = body_json(second).await;
        assert_eq!(json["error"]["code"], "rate_limited");
        assert!(json["meta"]["request_id"].as_str().is_some_and(|id| !id.is_empty()));
    }
}
