use crate::domain::meeting::{slugify, MeetingRecord};
use crate::domain::thumbnail::extract_thumbnail;
use crate::ports::blob::BlobStore;
use crate::ports::repository::MeetingRepository;
use chrono::Utc;
use std::fmt;
use std::path::{Path, PathBuf};

/// A validated multipart upload, with the video already streamed to a
/// local temp file by the HTTP adapter.
#[derive(Debug)]
pub struct UploadRequest {
    pub title: String,
    pub video_file_name: String,
    pub video_path: PathBuf,
    pub transcription: String,
    pub summary: String,
}

#[derive(Debug)]
pub enum UploadError {
    /// Title produced an empty slug.
    InvalidTitle,
    /// Blob storage or repository failure.
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::InvalidTitle => write!(
                f,
                "Invalid title. Please use a title that can be converted into a URL-friendly slug."
            ),
            UploadError::Storage(e) => write!(f, "Upload failed: {}", e),
        }
    }
}

impl std::error::Error for UploadError {}

pub struct UploadService<B, R> {
    blobs: B,
    repo: R,
    placeholder_thumbnail: String,
}

impl<B, R> UploadService<B, R>
where
    B: BlobStore,
    R: MeetingRepository,
{
    pub fn new(blobs: B, repo: R, placeholder_thumbnail: String) -> Self {
        Self {
            blobs,
            repo,
            placeholder_thumbnail,
        }
    }

    /// Store the three documents, extract a thumbnail, persist the
    /// meeting record, and return the share path (`/{slug}`).
    pub async fn handle_upload(&self, req: UploadRequest) -> Result<String, UploadError> {
        let slug = slugify(&req.title).ok_or(UploadError::InvalidTitle)?;

        let ext = Path::new(&req.video_file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("mp4");
        let video_key = format!("{}.{}", slug, ext);

        let video_url = self
            .blobs
            .put_file(&req.video_path, &video_key)
            .await
            .map_err(UploadError::Storage)?;
        let transcription_url = self
            .blobs
            .put(
                &format!("{}-transcription.txt", slug),
                req.transcription.into_bytes(),
            )
            .await
            .map_err(UploadError::Storage)?;
        let summary_url = self
            .blobs
            .put(&format!("{}-summary.txt", slug), req.summary.into_bytes())
            .await
            .map_err(UploadError::Storage)?;

        let thumbnail_url = self.store_thumbnail(&slug, &req.video_path).await;

        let record = MeetingRecord {
            title: req.title,
            video_url,
            transcription_url,
            summary_url,
            thumbnail_url,
            created_at: Utc::now(),
        };
        self.repo
            .save(&slug, &record)
            .await
            .map_err(UploadError::Storage)?;

        tracing::info!(%slug, "meeting stored");
        Ok(format!("/{}", slug))
    }

    /// Thumbnail extraction is best-effort: any failure falls back to
    /// the configured placeholder and never fails the upload.
    async fn store_thumbnail(&self, slug: &str, video_path: &Path) -> String {
        let frame = match extract_thumbnail(video_path).await {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(%slug, error = %e, "thumbnail extraction failed, using placeholder");
                return self.placeholder_thumbnail.clone();
            }
        };

        tracing::debug!(
            %slug,
            timestamp = frame.timestamp,
            score = frame.score,
            "thumbnail frame selected"
        );

        match self
            .blobs
            .put(&format!("{}-thumbnail.jpg", slug), frame.image)
            .await
        {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(%slug, error = %e, "thumbnail upload failed, using placeholder");
                self.placeholder_thumbnail.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::blob::MockBlobStore;
    use crate::ports::repository::MockMeetingRepository;
    use tempfile::NamedTempFile;

    const PLACEHOLDER: &str = "/assets/placeholder-thumbnail.png";

    fn garbage_video() -> NamedTempFile {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"not a real container").unwrap();
        file
    }

    fn request(title: &str, video: &NamedTempFile) -> UploadRequest {
        UploadRequest {
            title: title.to_string(),
            video_file_name: "recording.mp4".to_string(),
            video_path: video.path().to_path_buf(),
            transcription: "full transcription".to_string(),
            summary: "short summary".to_string(),
        }
    }

    #[tokio::test]
    async fn test_upload_stores_blobs_and_record() {
        let video = garbage_video();

        let mut blobs = MockBlobStore::new();
        blobs
            .expect_put_file()
            .withf(|_, key| key == "team-sync.mp4")
            .times(1)
            .returning(|_, key| Ok(format!("/blob/{}", key)));
        blobs
            .expect_put()
            .withf(|key, _| key == "team-sync-transcription.txt")
            .times(1)
            .returning(|key, _| Ok(format!("/blob/{}", key)));
        blobs
            .expect_put()
            .withf(|key, _| key == "team-sync-summary.txt")
            .times(1)
            .returning(|key, _| Ok(format!("/blob/{}", key)));

        let mut repo = MockMeetingRepository::new();
        repo.expect_save()
            .withf(|slug, record| {
                slug == "team-sync"
                    && record.title == "Team Sync"
                    && record.video_url == "/blob/team-sync.mp4"
                    && record.transcription_url == "/blob/team-sync-transcription.txt"
                    && record.summary_url == "/blob/team-sync-summary.txt"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = UploadService::new(blobs, repo, PLACEHOLDER.to_string());
        let url = service.handle_upload(request("Team Sync", &video)).await.unwrap();
        assert_eq!(url, "/team-sync");
    }

    #[tokio::test]
    async fn test_thumbnail_failure_falls_back_to_placeholder() {
        // The garbage video cannot be decoded, so extraction fails and
        // the record must carry the placeholder URL.
        let video = garbage_video();

        let mut blobs = MockBlobStore::new();
        blobs
            .expect_put_file()
            .returning(|_, key| Ok(format!("/blob/{}", key)));
        blobs
            .expect_put()
            .withf(|key, _| !key.ends_with("-thumbnail.jpg"))
            .returning(|key, _| Ok(format!("/blob/{}", key)));

        let mut repo = MockMeetingRepository::new();
        repo.expect_save()
            .withf(|_, record| record.thumbnail_url == PLACEHOLDER)
            .times(1)
            .returning(|_, _| Ok(()));

        let service = UploadService::new(blobs, repo, PLACEHOLDER.to_string());
        let url = service.handle_upload(request("Weekly Sync", &video)).await.unwrap();
        assert_eq!(url, "/weekly-sync");
    }

    #[tokio::test]
    async fn test_invalid_title_rejected_before_storage() {
        let video = garbage_video();
        let blobs = MockBlobStore::new();
        let repo = MockMeetingRepository::new();

        let service = UploadService::new(blobs, repo, PLACEHOLDER.to_string());
        let result = service.handle_upload(request("???", &video)).await;
        assert!(matches!(result, Err(UploadError::InvalidTitle)));
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let video = garbage_video();

        let mut blobs = MockBlobStore::new();
        blobs
            .expect_put_file()
            .returning(|_, _| Err("disk full".into()));

        let repo = MockMeetingRepository::new();
        let service = UploadService::new(blobs, repo, PLACEHOLDER.to_string());
        let result = service.handle_upload(request("Team Sync", &video)).await;
        assert!(matches!(result, Err(UploadError::Storage(_))));
    }
}
