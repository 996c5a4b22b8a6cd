//! In-memory timeline cache

use super::{CacheError, TimelineCache};
use crate::domain::Tweet;
use std::collections::HashMap;
use std::sync::RwLock;

/// Process-local timeline cache backed by a map
///
/// Uses a std lock because entries are small and operations never block;
/// a poisoned lock degrades to a miss on reads and an advisory error on
/// writes.
pub struct InMemoryTimelineCache {
    entries: RwLock<HashMap<String, Vec<Tweet>>>,
}

impl InMemoryTimelineCache {
    pub fn new() -> Self {
        InMemoryTimelineCache {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryTimelineCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineCache for InMemoryTimelineCache {
    fn get_timeline(&self, user_id: &str) -> Option<Vec<Tweet>> {
        let entries = self.entries.read().ok()?;
        entries.get(user_id).cloned()
    }

    fn set_timeline(&self, user_id: &str, tweets: &[Tweet]) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CacheError::Backend("cache lock poisoned".to_string()))?;
        entries.insert(user_id.to_string(), tweets.to_vec());
        Ok(())
    }

    fn invalidate_timeline(&self, user_id: &str) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CacheError::Backend("cache lock poisoned".to_string()))?;
        entries.remove(user_id);
        Ok(())
    }
}
