//! Redis adapter backing the meeting repository.
//!
//! Provides the `MeetingRepository` implementation: meeting records as
//! JSON values plus share/action counters.

mod error;
mod pool;
mod repository;

pub use error::RepositoryError;
pub use pool::RedisPool;

/// Redis key constants
const MEETING_PREFIX: &str = "melink:meeting:";
const SHARE_COUNT_PREFIX: &str = "melink:shares:";
const ACTION_COUNT_PREFIX: &str = "melink:actions:";
