//! Redis error types for the repository adapter.

use deadpool_redis::CreatePoolError;
use std::fmt;

pub type RedisError = deadpool_redis::redis::RedisError;
pub type PoolError = deadpool_redis::PoolError;

#[derive(Debug)]
pub enum RepositoryError {
    Redis(RedisError),
    Pool(PoolError),
    Serialization(serde_json::Error),
    CreatePool(String),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::Redis(e) => write!(f, "Redis error: {}", e),
            RepositoryError::Pool(e) => write!(f, "Pool error: {}", e),
            RepositoryError::Serialization(e) => write!(f, "Serialization error: {}", e),
            RepositoryError::CreatePool(e) => write!(f, "Create pool error: {}", e),
        }
    }
}

impl std::error::Error for RepositoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RepositoryError::Redis(e) => Some(e),
            RepositoryError::Pool(e) => Some(e),
            RepositoryError::Serialization(e) => Some(e),
            RepositoryError::CreatePool(_) => None,
        }
    }
}

impl From<RedisError> for RepositoryError {
    fn from(err: RedisError) -> Self {
        RepositoryError::Redis(err)
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::Pool(err)
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err)
    }
}

impl From<CreatePoolError> for RepositoryError {
    fn from(err: CreatePoolError) -> Self {
        RepositoryError::CreatePool(format!("{}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::meeting::MeetingRecord;

    #[test]
    fn test_malformed_record_json_maps_to_serialization() {
        let err = serde_json::from_str::<MeetingRecord>("not json").unwrap_err();
        let mapped = RepositoryError::from(err);
        assert!(matches!(mapped, RepositoryError::Serialization(_)));
        assert!(mapped.to_string().starts_with("Serialization error:"));
    }
}
