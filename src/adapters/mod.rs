//! Adapters - Concrete implementations of ports.

pub mod fs;
pub mod http;
pub mod redis;

pub use fs::FsBlobStore;
pub use redis::RedisPool;
