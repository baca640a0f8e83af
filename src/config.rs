//! Environment configuration.

use std::env;

/// Configuration for the single-server deployment.
#[derive(Clone, Debug)]
pub struct Config {
    /// HTTP server bind address
    pub addr: String,
    /// HTTP server port
    pub port: String,
    /// Redis connection URL
    pub redis_url: String,
    /// Directory where uploaded blobs are stored
    pub storage_dir: String,
    /// Base URL prepended to blob paths in stored records.
    /// Empty means relative URLs.
    pub public_base_url: String,
    /// Thumbnail URL used when extraction fails
    pub placeholder_thumbnail: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            addr: env::var("ADDR").unwrap_or_else(|_| String::from("127.0.0.1")),
            port: env::var("PORT").unwrap_or_else(|_| String::from("3000")),
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| String::from("redis://127.0.0.1/")),
            storage_dir: env::var("STORAGE_DIR").unwrap_or_else(|_| String::from("./storage")),
            public_base_url: env::var("PUBLIC_BASE_URL").unwrap_or_default(),
            placeholder_thumbnail: env::var("PLACEHOLDER_THUMBNAIL")
                .unwrap_or_else(|_| String::from("/assets/placeholder-thumbnail.png")),
        }
    }
}
