//! Timeline cache module
//!
//! Optional side channel for timeline reads. Cache failures are advisory:
//! a get error is a miss, set/invalidate errors are logged and swallowed.
//! Business outcomes never depend on cache health.

mod memory;
mod noop;
mod worker;

pub use memory::InMemoryTimelineCache;
pub use noop::NoopCache;
pub use worker::InvalidationQueue;

use crate::domain::Tweet;
use std::fmt;

/// Timeline cache capability consumed by the services
///
/// Implementations must be cheap to call from request tasks; anything
/// slow belongs behind the invalidation queue.
pub trait TimelineCache: Send + Sync {
    /// Fetch a cached timeline, `None` on miss (or any backend failure)
    fn get_timeline(&self, user_id: &str) -> Option<Vec<Tweet>>;

    /// Store a computed timeline
    fn set_timeline(&self, user_id: &str, tweets: &[Tweet]) -> Result<(), CacheError>;

    /// Drop a user's cached timeline
    fn invalidate_timeline(&self, user_id: &str) -> Result<(), CacheError>;
}

/// Cache backend failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The backend rejected or lost the operation
    Backend(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Backend(msg) => write!(f, "cache backend error: {}", msg),
        }
    }
}

impl std::error::Error for CacheError {}
