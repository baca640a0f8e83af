//! Filesystem blob store for single-server deployment.

use crate::ports::blob::BlobStore;
use async_trait::async_trait;
use std::error::Error;
use std::path::{Path, PathBuf};

/// Stores blobs under a base directory; objects are served back by the
/// HTTP adapter at `/blob/{key}`.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
    public_base: String,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into(),
        }
    }

    /// Absolute path of a key on disk.
    pub fn resolve(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/blob/{}", self.public_base.trim_end_matches('/'), key)
    }

    fn check_key(key: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        // Prevent directory traversal
        if key.is_empty() || key.contains("..") {
            return Err(format!("invalid blob key: {:?}", key).into());
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        Self::check_key(key)?;
        let path = self.resolve(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        Ok(self.url_for(key))
    }

    async fn put_file(
        &self,
        local_path: &Path,
        key: &str,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        Self::check_key(key)?;
        let path = self.resolve(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        if path != local_path {
            tokio::fs::copy(local_path, &path).await?;
        }
        Ok(self.url_for(key))
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>> {
        Self::check_key(key)?;
        Ok(tokio::fs::read(self.resolve(key)).await?)
    }
}
