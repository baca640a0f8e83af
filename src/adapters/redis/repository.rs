//! Redis MeetingRepository implementation.

use super::error::RepositoryError;
use super::pool::RedisPool;
use super::{ACTION_COUNT_PREFIX, MEETING_PREFIX, SHARE_COUNT_PREFIX};
use crate::domain::meeting::MeetingRecord;
use crate::ports::repository::MeetingRepository;
use async_trait::async_trait;
use deadpool_redis::redis::AsyncCommands;

#[async_trait]
impl MeetingRepository for RedisPool {
    async fn save(
        &self,
        slug: &str,
        record: &MeetingRecord,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut conn = self.pool.get().await.map_err(RepositoryError::from)?;
        let key = format!("{}{}", MEETING_PREFIX, slug);
        let json = serde_json::to_string(record).map_err(RepositoryError::from)?;
        conn.set::<_, _, ()>(&key, json)
            .await
            .map_err(RepositoryError::from)?;
        Ok(())
    }

    async fn find(
        &self,
        slug: &str,
    ) -> Result<Option<MeetingRecord>, Box<dyn std::error::Error + Send + Sync>> {
        let mut conn = self.pool.get().await.map_err(RepositoryError::from)?;
        let key = format!("{}{}", MEETING_PREFIX, slug);
        let json: Option<String> = conn.get(&key).await.map_err(RepositoryError::from)?;
        match json {
            Some(data) => Ok(Some(
                serde_json::from_str(&data).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    async fn record_share(
        &self,
        slug: &str,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        let mut conn = self.pool.get().await.map_err(RepositoryError::from)?;
        let key = format!("{}{}", SHARE_COUNT_PREFIX, slug);
        let count: u64 = conn.incr(&key, 1i64).await.map_err(RepositoryError::from)?;
        Ok(count)
    }

    async fn record_action(
        &self,
        slug: &str,
        action: &str,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        let mut conn = self.pool.get().await.map_err(RepositoryError::from)?;
        let key = format!("{}{}:{}", ACTION_COUNT_PREFIX, slug, action);
        let count: u64 = conn.incr(&key, 1i64).await.map_err(RepositoryError::from)?;
        Ok(count)
    }
}
