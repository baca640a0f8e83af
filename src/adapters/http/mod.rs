//! HTTP inbound adapter.
//!
//! Exposes the upload form endpoint, the share-data API, the
//! engagement counters, and blob serving.

mod blob;
mod data;
mod upload;

use crate::adapters::{FsBlobStore, RedisPool};
use crate::application::{ShareService, UploadService};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub upload: Arc<UploadService<FsBlobStore, RedisPool>>,
    pub share: Arc<ShareService<RedisPool>>,
    pub blobs: FsBlobStore,
}

/// JSON error payload shared by all endpoints.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/upload", post(upload::handle))
        .route("/api/data/:slug", get(data::data))
        .route("/api/share", post(data::share))
        .route("/api/action", post(data::action))
        .route("/blob/*key", get(blob::serve))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .with_state(state)
}
