//! MeLink - Meeting Video Sharing Library
//!
//! Hexagonal Architecture:
//! - domain/: Pure business logic (thumbnail extraction, meeting records)
//! - ports/: Trait definitions (blob storage, meeting repository)
//! - adapters/: Concrete implementations (filesystem, Redis, HTTP)
//! - application/: Generic services (upload, share)
//! - config: Environment configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use config::Config;
pub use domain::thumbnail;
