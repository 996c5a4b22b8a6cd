//! Tweet use cases: creation, timelines, per-user listings

use crate::cache::{InvalidationQueue, TimelineCache};
use crate::domain::{DomainError, Tweet, MAX_TIMELINE_LIMIT};
use crate::logger::Logger;
use crate::store::MemoryStore;
use std::sync::Arc;

/// Business logic for tweets and timeline reads
pub struct TweetService {
    store: Arc<MemoryStore>,
    cache: Arc<dyn TimelineCache>,
    invalidations: InvalidationQueue,
    logger: Arc<dyn Logger>,
}

impl TweetService {
    pub fn new(
        store: Arc<MemoryStore>,
        cache: Arc<dyn TimelineCache>,
        invalidations: InvalidationQueue,
        logger: Arc<dyn Logger>,
    ) -> Self {
        TweetService {
            store,
            cache,
            invalidations,
            logger,
        }
    }

    /// Create a tweet for an existing user
    ///
    /// The author must exist and the content must satisfy the 1..=280
    /// byte rule. On success the followers' cached timelines are
    /// invalidated best-effort; invalidation failures never surface here.
    pub async fn create_tweet(&self, user_id: &str, content: &str) -> Result<Tweet, DomainError> {
        if !self.store.user_exists(user_id).await {
            return Err(DomainError::UserNotFound);
        }

        let tweet = Tweet::new(user_id, content)?;
        self.store.create_tweet(tweet.clone()).await;

        self.invalidate_follower_timelines(user_id).await;

        self.logger.info(
            "tweet created",
            &[
                ("tweet_id", tweet.id.clone()),
                ("user_id", user_id.to_string()),
            ],
        );
        Ok(tweet)
    }

    /// Read a user's timeline: their own tweets plus everyone they follow
    ///
    /// `limit` is clamped to `(0, MAX_TIMELINE_LIMIT]`; out-of-range
    /// values fall back to the maximum. The cache is a fast path only.
    pub async fn get_timeline(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<Tweet>, DomainError> {
        let limit = if limit == 0 || limit > MAX_TIMELINE_LIMIT {
            MAX_TIMELINE_LIMIT
        } else {
            limit
        };

        if let Some(tweets) = self.cache.get_timeline(user_id) {
            self.logger
                .debug("timeline served from cache", &[("user_id", user_id.to_string())]);
            return Ok(tweets);
        }

        // A user's own tweets always appear in their timeline.
        let mut authors = self.store.get_following(user_id).await;
        authors.push(user_id.to_string());

        let tweets = self.store.get_timeline(&authors, limit).await;

        if let Err(err) = self.cache.set_timeline(user_id, &tweets) {
            self.logger.warn(
                "failed to cache timeline",
                &[
                    ("user_id", user_id.to_string()),
                    ("error", err.to_string()),
                ],
            );
        }

        self.logger.info(
            "timeline retrieved",
            &[
                ("user_id", user_id.to_string()),
                ("tweet_count", tweets.len().to_string()),
            ],
        );
        Ok(tweets)
    }

    /// All tweets by one author, most recent first (no cache involved)
    pub async fn get_user_tweets(&self, user_id: &str) -> Result<Vec<Tweet>, DomainError> {
        let tweets = self.store.get_tweets_by_user(user_id).await;
        self.logger.debug(
            "user tweets retrieved",
            &[
                ("user_id", user_id.to_string()),
                ("tweet_count", tweets.len().to_string()),
            ],
        );
        Ok(tweets)
    }

    /// Look up a single tweet by id
    pub async fn get_tweet(&self, id: &str) -> Result<Tweet, DomainError> {
        self.store.get_tweet_by_id(id).await
    }

    /// Delete a tweet by id
    ///
    /// Fails with TweetNotFound when absent. Cached timelines of the
    /// author and their followers are invalidated best-effort.
    pub async fn delete_tweet(&self, id: &str) -> Result<(), DomainError> {
        let tweet = self.store.get_tweet_by_id(id).await?;
        self.store.delete_tweet(id).await?;

        self.invalidate_follower_timelines(&tweet.user_id).await;
        self.invalidations.enqueue(&tweet.user_id);

        self.logger.info(
            "tweet deleted",
            &[
                ("tweet_id", id.to_string()),
                ("user_id", tweet.user_id.clone()),
            ],
        );
        Ok(())
    }

    /// Fan out a timeline invalidation to every current follower
    async fn invalidate_follower_timelines(&self, user_id: &str) {
        let followers = self.store.get_followers(user_id).await;
        for follower_id in followers {
            self.invalidations.enqueue(&follower_id);
        }
    }
}
