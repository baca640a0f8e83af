//! Domain layer - Pure business logic.

pub mod meeting;
pub mod thumbnail;
