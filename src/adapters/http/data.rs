//! Share-page data lookup and engagement counters.

use super::{AppState, ErrorBody};
use crate::domain::meeting::MeetingRecord;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

type ApiError = (StatusCode, Json<ErrorBody>);

pub async fn data(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<MeetingRecord>, ApiError> {
    match state.share.data(&slug).await {
        Ok(Some(record)) => Ok(Json(record)),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorBody::new("Meeting not found.")),
        )),
        Err(e) => {
            tracing::error!(%slug, error = %e, "data lookup failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new("Failed to load meeting data.")),
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub slug: String,
    pub action: String,
}

#[derive(Debug, Serialize)]
pub struct CounterResponse {
    pub success: bool,
    pub count: u64,
}

pub async fn share(
    State(state): State<AppState>,
    Json(req): Json<ShareRequest>,
) -> Result<Json<CounterResponse>, ApiError> {
    match state.share.record_share(&req.slug).await {
        Ok(count) => Ok(Json(CounterResponse {
            success: true,
            count,
        })),
        Err(e) => {
            tracing::error!(slug = %req.slug, error = %e, "share counter failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new("Failed to record share.")),
            ))
        }
    }
}

pub async fn action(
    State(state): State<AppState>,
    Json(req): Json<ActionRequest>,
) -> Result<Json<CounterResponse>, ApiError> {
    match state.share.record_action(&req.slug, &req.action).await {
        Ok(count) => Ok(Json(CounterResponse {
            success: true,
            count,
        })),
        Err(e) => {
            tracing::error!(slug = %req.slug, action = %req.action, error = %e, "action counter failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new("Failed to record action.")),
            ))
        }
    }
}
