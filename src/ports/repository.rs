use crate::domain::meeting::MeetingRecord;
use async_trait::async_trait;
use std::error::Error;

/// Key-value persistence for meeting records and engagement counters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MeetingRepository: Send + Sync {
    /// Persist a meeting record under its slug.
    async fn save(
        &self,
        slug: &str,
        record: &MeetingRecord,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Look up a meeting record by slug.
    async fn find(
        &self,
        slug: &str,
    ) -> Result<Option<MeetingRecord>, Box<dyn Error + Send + Sync>>;

    /// Increment the share counter for a slug.
    /// Returns the new count.
    async fn record_share(&self, slug: &str) -> Result<u64, Box<dyn Error + Send + Sync>>;

    /// Increment a named action counter for a slug.
    /// Returns the new count.
    async fn record_action(
        &self,
        slug: &str,
        action: &str,
    ) -> Result<u64, Box<dyn Error + Send + Sync>>;
}
