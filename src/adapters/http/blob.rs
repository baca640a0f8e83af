//! Serves stored blobs (videos, documents, thumbnails) back over HTTP.

use super::{AppState, ErrorBody};
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tokio_util::io::ReaderStream;

fn key_is_valid(key: &str) -> bool {
    !key.is_empty() && !key.split('/').any(|part| part == ".." || part.is_empty())
}

pub async fn serve(State(state): State<AppState>, Path(key): Path<String>) -> Response {
    if !key_is_valid(&key) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new("Invalid blob key.")),
        )
            .into_response();
    }

    let path = state.blobs.resolve(&key);
    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(_) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorBody::new("Blob not found.")),
            )
                .into_response()
        }
    };

    let content_type = mime_guess::from_path(&key)
        .first_or_octet_stream()
        .to_string();
    let body = Body::from_stream(ReaderStream::new(file));

    ([(header::CONTENT_TYPE, content_type)], body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_validation() {
        assert!(key_is_valid("weekly-sync.mp4"));
        assert!(key_is_valid("thumbs/weekly-sync-thumbnail.jpg"));
        assert!(!key_is_valid(""));
        assert!(!key_is_valid("../secrets.txt"));
        assert!(!key_is_valid("a/../b"));
        assert!(!key_is_valid("a//b"));
    }
}
