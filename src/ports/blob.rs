use async_trait::async_trait;
use std::error::Error;
use std::path::Path;

/// Object storage for uploaded videos, text documents, and thumbnails.
/// `put*` operations return the public URL the stored object is
/// reachable at.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store an in-memory blob under `key`.
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
    ) -> Result<String, Box<dyn Error + Send + Sync>>;

    /// Store a file already on local disk under `key`.
    async fn put_file(
        &self,
        local_path: &Path,
        key: &str,
    ) -> Result<String, Box<dyn Error + Send + Sync>>;

    /// Fetch a stored blob.
    async fn get(&self, key: &str) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>>;
}
