use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    Extension, Json,
};
use informint_analytics::{
    sample_posts, write_analyses_csv, AnalyticsError, BatchReport, CreatorPerformance,
    EngagementOverview,
};
use informint_core::{Benchmarks, PostRecord};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// Request body shared by every endpoint that takes posts: `{"data": [...]}`.
#[derive(Debug, Deserialize)]
pub(super) struct PostsPayload {
    #[serde(default)]
    pub data: Vec<PostRecord>,
}

fn map_analytics_error(request_id: String, error: &AnalyticsError) -> ApiError {
    match error {
        AnalyticsError::NoValidData => {
            ApiError::new(request_id, "no_valid_data", error.to_string())
        }
        AnalyticsError::Csv(_) | AnalyticsError::Io(_) => {
            tracing::error!(error = %error, "analytics export failed");
            ApiError::new(request_id, "internal_error", "failed to export analytics")
        }
    }
}

/// Unwrap the JSON body and enforce the configured batch size limit.
fn accept_posts(
    state: &AppState,
    request_id: &str,
    payload: Result<Json<PostsPayload>, JsonRejection>,
) -> Result<Vec<PostRecord>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected analytics payload");
        ApiError::new(request_id, "bad_request", rejection.body_text())
    })?;

    if payload.data.len() > state.max_batch_posts {
        return Err(ApiError::new(
            request_id,
            "validation_error",
            format!(
                "batch of {} posts exceeds the limit of {}",
                payload.data.len(),
                state.max_batch_posts
            ),
        ));
    }

    Ok(payload.data)
}

pub(super) async fn analyze_batch(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<PostsPayload>, JsonRejection>,
) -> Result<Json<ApiResponse<BatchReport>>, ApiError> {
    let posts = accept_posts(&state, &req_id.0, payload)?;
    let report = state
        .engine
        .analyze_batch(&posts)
        .map_err(|e| map_analytics_error(req_id.0.clone(), &e))?;

    tracing::info!(
        posts = report.summary.total_posts,
        creators = report.summary.total_creators,
        "generated analytics"
    );

    Ok(Json(ApiResponse {
        data: report,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn analyze_sample(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<BatchReport>>, ApiError> {
    let report = state
        .engine
        .analyze_batch(&sample_posts())
        .map_err(|e| map_analytics_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: report,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn engagement_overview(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<PostsPayload>, JsonRejection>,
) -> Result<Json<ApiResponse<EngagementOverview>>, ApiError> {
    let posts = accept_posts(&state, &req_id.0, payload)?;
    let overview = state
        .engine
        .engagement_overview(&posts)
        .map_err(|e| map_analytics_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: overview,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn creator_performance(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<PostsPayload>, JsonRejection>,
) -> Result<Json<ApiResponse<CreatorPerformance>>, ApiError> {
    let posts = accept_posts(&state, &req_id.0, payload)?;
    let matrix = state
        .engine
        .creator_performance(&posts)
        .map_err(|e| map_analytics_error(req_id.0.clone(), &e))?;

    tracing::info!(creators = matrix.total_creators, "ranked creators");

    Ok(Json(ApiResponse {
        data: matrix,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_benchmarks(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Benchmarks>> {
    Json(ApiResponse {
        data: state.engine.benchmarks().clone(),
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn export_csv(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<PostsPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let posts = accept_posts(&state, &req_id.0, payload)?;
    if posts.is_empty() {
        return Err(map_analytics_error(req_id.0, &AnalyticsError::NoValidData));
    }

    let analyses = state.engine.analyze_posts(&posts);
    let mut buf = Vec::new();
    write_analyses_csv(&mut buf, &analyses)
        .map_err(|e| map_analytics_error(req_id.0.clone(), &e))?;

    tracing::info!(rows = analyses.len(), "exported analytics csv");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"informint-analytics.csv\"",
            ),
        ],
        buf,
    ))
}
