use crate::domain::meeting::MeetingRecord;
use crate::ports::repository::MeetingRepository;

/// Read side of the share page: record lookup plus engagement
/// counters.
pub struct ShareService<R> {
    repo: R,
}

impl<R> ShareService<R>
where
    R: MeetingRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn data(
        &self,
        slug: &str,
    ) -> Result<Option<MeetingRecord>, Box<dyn std::error::Error + Send + Sync>> {
        self.repo.find(slug).await
    }

    pub async fn record_share(
        &self,
        slug: &str,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        let count = self.repo.record_share(slug).await?;
        tracing::info!(%slug, count, "share recorded");
        Ok(count)
    }

    pub async fn record_action(
        &self,
        slug: &str,
        action: &str,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        let count = self.repo.record_action(slug, action).await?;
        tracing::info!(%slug, action, count, "action recorded");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::repository::MockMeetingRepository;
    use chrono::Utc;

    fn record() -> MeetingRecord {
        MeetingRecord {
            title: "Team Sync".to_string(),
            video_url: "/blob/team-sync.mp4".to_string(),
            transcription_url: "/blob/team-sync-transcription.txt".to_string(),
            summary_url: "/blob/team-sync-summary.txt".to_string(),
            thumbnail_url: "/blob/team-sync-thumbnail.jpg".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_data_returns_record() {
        let mut repo = MockMeetingRepository::new();
        repo.expect_find()
            .withf(|slug| slug == "team-sync")
            .returning(|_| Ok(Some(record())));

        let service = ShareService::new(repo);
        let found = service.data("team-sync").await.unwrap();
        assert_eq!(found.unwrap().title, "Team Sync");
    }

    #[tokio::test]
    async fn test_data_unknown_slug_is_none() {
        let mut repo = MockMeetingRepository::new();
        repo.expect_find().returning(|_| Ok(None));

        let service = ShareService::new(repo);
        assert!(service.data("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_counters_passthrough() {
        let mut repo = MockMeetingRepository::new();
        repo.expect_record_share().returning(|_| Ok(3));
        repo.expect_record_action()
            .withf(|slug, action| slug == "team-sync" && action == "download")
            .returning(|_, _| Ok(7));

        let service = ShareService::new(repo);
        assert_eq!(service.record_share("team-sync").await.unwrap(), 3);
        assert_eq!(
            service.record_action("team-sync", "download").await.unwrap(),
            7
        );
    }
}
