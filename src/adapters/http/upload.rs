//! Multipart upload endpoint.

use super::{AppState, ErrorBody};
use crate::application::{UploadError, UploadRequest};
use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::{BoxError, Json};
use futures::{Stream, TryStreamExt};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tokio::{fs::File, io::BufWriter};
use tokio_util::io::StreamReader;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorBody::new(message)))
}

fn internal(message: impl Into<String>) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new(message)),
    )
}

// Handler that accepts the upload form (title, video, transcription,
// summary) and streams the video field to a temp file before handing
// off to the upload service.
pub async fn handle(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut title: Option<String> = None;
    let mut transcription: Option<String> = None;
    let mut summary: Option<String> = None;
    let mut video: Option<(String, NamedTempFile)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("title") => {
                title = Some(field.text().await.map_err(|e| bad_request(e.to_string()))?)
            }
            Some("transcription") => {
                transcription =
                    Some(field.text().await.map_err(|e| bad_request(e.to_string()))?)
            }
            Some("summary") => {
                summary = Some(field.text().await.map_err(|e| bad_request(e.to_string()))?)
            }
            Some("video") => {
                let file_name = field
                    .file_name()
                    .unwrap_or("recording.mp4")
                    .to_owned();
                let temp = NamedTempFile::new().map_err(|e| internal(e.to_string()))?;
                let path = temp.path().to_path_buf();
                stream_to_file(&path, field)
                    .await
                    .map_err(|(status, msg)| (status, Json(ErrorBody::new(msg))))?;
                video = Some((file_name, temp));
            }
            _ => {}
        }
    }

    let (title, transcription, summary, (video_file_name, video_temp)) =
        match (title, transcription, summary, video) {
            (Some(t), Some(tr), Some(s), Some(v)) => (t, tr, s, v),
            _ => return Err(bad_request("Missing required fields.")),
        };

    let request = UploadRequest {
        title,
        video_file_name,
        video_path: video_temp.path().to_path_buf(),
        transcription,
        summary,
    };

    // The temp file must outlive the service call; extraction reads it.
    let result = state.upload.handle_upload(request).await;
    drop(video_temp);

    match result {
        Ok(url) => Ok(Json(UploadResponse { url })),
        Err(e @ UploadError::InvalidTitle) => Err(bad_request(e.to_string())),
        Err(e @ UploadError::Storage(_)) => {
            tracing::error!(error = %e, "upload failed");
            Err(internal(e.to_string()))
        }
    }
}

// Save a `Stream` to a file
async fn stream_to_file<S, E>(path: &PathBuf, stream: S) -> Result<(), (StatusCode, String)>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<BoxError>,
{
    async {
        let body_with_io_error = stream.map_err(|err| io::Error::new(io::ErrorKind::Other, err));
        let body_reader = StreamReader::new(body_with_io_error);
        futures::pin_mut!(body_reader);

        let mut file = BufWriter::new(File::create(path).await?);
        tokio::io::copy(&mut body_reader, &mut file).await?;

        Ok::<_, io::Error>(())
    }
    .await
    .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use futures::stream;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_stream_to_file() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("test_file.txt");

        type E = std::io::Error;

        let test_data = "Hello, world!";
        let mock_stream = stream::iter(vec![Ok::<bytes::Bytes, E>(Bytes::from(test_data))]);

        let result = stream_to_file(&file_path, mock_stream).await;
        assert!(result.is_ok());

        let file_contents = fs::read_to_string(file_path).unwrap();
        assert_eq!(file_contents, test_data);
    }

    #[tokio::test]
    async fn test_stream_to_file_multiple_chunks() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("chunks.bin");

        type E = std::io::Error;

        let chunks = vec![
            Ok::<bytes::Bytes, E>(Bytes::from_static(b"part one ")),
            Ok::<bytes::Bytes, E>(Bytes::from_static(b"part two")),
        ];
        let result = stream_to_file(&file_path, stream::iter(chunks)).await;
        assert!(result.is_ok());
        assert_eq!(fs::read(&file_path).unwrap(), b"part one part two");
    }

    #[tokio::test]
    async fn test_stream_to_file_error() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("test_file.txt");

        let mock_stream = stream::iter(vec![Err("Test error")]);

        let result = stream_to_file(&file_path, mock_stream).await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err(),
            (StatusCode::INTERNAL_SERVER_ERROR, "Test error".to_string())
        );
    }
}
