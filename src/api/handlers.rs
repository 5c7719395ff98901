//! Request handlers.

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::analytics;
use crate::pipeline::SubmitOutcome;

use super::error::ApiError;
use super::server::AppState;
use super::types::{
    ClaimRequest, ClassifyRequest, DecideRequest, ExportQuery, HealthResponse, ItemView,
    PendingListResponse, WindowQuery,
};

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let signature_version = state
        .pipeline
        .signatures()
        .current()
        .ok()
        .map(|set| set.version().to_string());
    Json(HealthResponse {
        status: "ok",
        signature_version,
        queue_depth: state.pipeline.queue().pending().len(),
    })
}

pub async fn classify(
    State(state): State<AppState>,
    Json(req): Json<ClassifyRequest>,
) -> Result<Json<SubmitOutcome>, ApiError> {
    let outcome = state.pipeline.submit(&req.text, &req.context_flags)?;
    Ok(Json(outcome))
}

pub async fn claim_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Json(req): Json<ClaimRequest>,
) -> Result<Json<ItemView>, ApiError> {
    if req.moderator_id.trim().is_empty() {
        return Err(ApiError::InvalidInput("moderator_id must not be empty".into()));
    }
    let item = state.pipeline.queue().claim(item_id, &req.moderator_id)?;
    Ok(Json(item.into()))
}

pub async fn decide_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Json(req): Json<DecideRequest>,
) -> Result<Json<ItemView>, ApiError> {
    if req.moderator_id.trim().is_empty() {
        return Err(ApiError::InvalidInput("moderator_id must not be empty".into()));
    }
    let item = state
        .pipeline
        .queue()
        .decide(item_id, &req.moderator_id, req.action, req.notes)?;
    Ok(Json(item.into()))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
) -> Result<Json<ItemView>, ApiError> {
    let item = state.pipeline.queue().get(item_id)?;
    Ok(Json(item.into()))
}

pub async fn list_pending(State(state): State<AppState>) -> Json<PendingListResponse> {
    let items: Vec<ItemView> = state
        .pipeline
        .queue()
        .pending()
        .into_iter()
        .map(ItemView::from)
        .collect();
    let total = items.len();
    Json(PendingListResponse { items, total })
}

/// Admin-token check for analytics endpoints. Accepts
/// `Authorization: Bearer <token>`; analytics are unreachable when no token
/// is configured.
fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let expected = state.config.admin_token.as_deref().ok_or(ApiError::Unauthorized)?;
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?;
    if presented != expected {
        return Err(ApiError::Unauthorized);
    }
    Ok(())
}

pub async fn analytics_overview(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<WindowQuery>,
) -> Result<Response, ApiError> {
    require_admin(&state, &headers)?;
    let snapshot = analytics::overview(
        state.pipeline.queue(),
        query.days,
        state.config.top_keywords,
    )?;
    Ok(Json(snapshot).into_response())
}

pub async fn analytics_timeline(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<WindowQuery>,
) -> Result<Response, ApiError> {
    require_admin(&state, &headers)?;
    let series = analytics::timeline(state.pipeline.queue(), query.days)?;
    Ok(Json(series).into_response())
}

pub async fn analytics_moderator_performance(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<WindowQuery>,
) -> Result<Response, ApiError> {
    require_admin(&state, &headers)?;
    let perf = analytics::moderator_performance(state.pipeline.queue(), query.days)?;
    Ok(Json(perf).into_response())
}

pub async fn analytics_export(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    require_admin(&state, &headers)?;
    let format: analytics::ExportFormat = query.format.parse()?;
    let bytes = analytics::export(state.pipeline.queue(), query.days, format)?;

    let response = match format {
        analytics::ExportFormat::Json => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            bytes,
        )
            .into_response(),
        // CSV triggers a file download.
        analytics::ExportFormat::Csv => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"moderation_export.csv\"",
                ),
            ],
            bytes,
        )
            .into_response(),
    };
    Ok(response)
}
