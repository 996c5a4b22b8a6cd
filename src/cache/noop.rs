//! No-op cache for running without a cache collaborator
//!
//! Wiring this implementation instead of passing an option keeps the
//! services free of is-cache-present checks. Every read is a miss and
//! every write succeeds.

use super::{CacheError, TimelineCache};
use crate::domain::Tweet;

/// Cache implementation used when caching is disabled
pub struct NoopCache;

impl TimelineCache for NoopCache {
    fn get_timeline(&self, _user_id: &str) -> Option<Vec<Tweet>> {
        None
    }

    fn set_timeline(&self, _user_id: &str, _tweets: &[Tweet]) -> Result<(), CacheError> {
        Ok(())
    }

    fn invalidate_timeline(&self, _user_id: &str) -> Result<(), CacheError> {
        Ok(())
    }
}
