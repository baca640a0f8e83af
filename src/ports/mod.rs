//! Ports - Trait definitions implemented by adapters.

pub mod blob;
pub mod repository;
