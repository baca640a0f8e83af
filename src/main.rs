//! MeLink server binary.
//!
//! Wires up:
//! - Local adapters (filesystem blob store, Redis repository)
//! - Application services (upload, share)
//! - HTTP inbound adapter

use melink::adapters::http::{router, AppState};
use melink::adapters::{FsBlobStore, RedisPool};
use melink::application::{ShareService, UploadService};
use melink::config::Config;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    tracing_subscriber::fmt::init();

    // 1. Adapters (Local implementations)
    let redis = match RedisPool::new(&config.redis_url) {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Failed to connect to Redis: {:?}", e);
            std::process::exit(1);
        }
    };

    let blobs = FsBlobStore::new(&config.storage_dir, &config.public_base_url);

    // 2. Application Services
    let upload = Arc::new(UploadService::new(
        blobs.clone(),
        redis.clone(),
        config.placeholder_thumbnail.clone(),
    ));
    let share = Arc::new(ShareService::new(redis.clone()));

    // 3. HTTP Layer
    let app = router(AppState {
        upload,
        share,
        blobs,
    });

    // 4. Start Server
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", config.addr, config.port))
        .await
        .expect("Failed to bind TCP listener");
    tracing::info!("Listening at {}:{}", config.addr, config.port);
    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
