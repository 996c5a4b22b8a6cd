//! In-memory repository implementation
//!
//! All three collections live behind a single read/write lock so that
//! multi-key reads see one consistent snapshot and check-then-act
//! mutations never interleave. The lock is never held across calls into
//! the cache or logger collaborators.

use crate::domain::{DomainError, Tweet, User, MAX_TIMELINE_LIMIT};
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

/// A tweet together with the sequence number it was inserted under.
/// The sequence breaks `created_at` ties deterministically.
#[derive(Debug, Clone)]
struct StoredTweet {
    tweet: Tweet,
    seq: u64,
}

/// The collections guarded by the store lock
#[derive(Default)]
struct Collections {
    /// Tweets keyed by id
    tweets: HashMap<String, StoredTweet>,

    /// Users keyed by id
    users: HashMap<String, User>,

    /// Follower id → set of followee ids
    follows: HashMap<String, HashSet<String>>,

    /// Next insertion sequence number
    next_seq: u64,
}

/// Thread-safe in-memory store for tweets, users and follow edges
///
/// Mutations take the write lock for their entire check-then-act step;
/// reads take the read lock and may run concurrently with each other.
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        MemoryStore {
            inner: RwLock::new(Collections::default()),
        }
    }

    // Tweet operations

    /// Insert a tweet keyed by id. The caller guarantees id uniqueness.
    /// The tweet is visible to subsequent reads immediately.
    pub async fn create_tweet(&self, tweet: Tweet) {
        let mut inner = self.inner.write().await;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.tweets.insert(tweet.id.clone(), StoredTweet { tweet, seq });
    }

    /// Look up a tweet by id
    pub async fn get_tweet_by_id(&self, id: &str) -> Result<Tweet, DomainError> {
        let inner = self.inner.read().await;
        inner
            .tweets
            .get(id)
            .map(|stored| stored.tweet.clone())
            .ok_or(DomainError::TweetNotFound)
    }

    /// All tweets by one author, most recent first.
    /// Returns an empty vec when the author has no tweets.
    pub async fn get_tweets_by_user(&self, user_id: &str) -> Vec<Tweet> {
        let inner = self.inner.read().await;
        let mut matched: Vec<&StoredTweet> = inner
            .tweets
            .values()
            .filter(|stored| stored.tweet.user_id == user_id)
            .collect();

        sort_descending(&mut matched);
        matched.into_iter().map(|stored| stored.tweet.clone()).collect()
    }

    /// Union of tweets authored by any of `user_ids`, most recent first,
    /// truncated to `limit`. An out-of-range limit (0 or above
    /// MAX_TIMELINE_LIMIT) falls back to MAX_TIMELINE_LIMIT; the result
    /// is never unbounded.
    ///
    /// This is a snapshot read: the whole merge happens under one read
    /// lock acquisition.
    pub async fn get_timeline(&self, user_ids: &[String], limit: usize) -> Vec<Tweet> {
        let limit = if limit == 0 || limit > MAX_TIMELINE_LIMIT {
            MAX_TIMELINE_LIMIT
        } else {
            limit
        };
        let authors: HashSet<&str> = user_ids.iter().map(String::as_str).collect();

        let inner = self.inner.read().await;
        let mut matched: Vec<&StoredTweet> = inner
            .tweets
            .values()
            .filter(|stored| authors.contains(stored.tweet.user_id.as_str()))
            .collect();

        sort_descending(&mut matched);

        if matched.len() > limit {
            matched.truncate(limit);
        }

        matched.into_iter().map(|stored| stored.tweet.clone()).collect()
    }

    /// Remove a tweet by id. A retry after success observes TweetNotFound.
    pub async fn delete_tweet(&self, id: &str) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;
        inner
            .tweets
            .remove(id)
            .map(|_| ())
            .ok_or(DomainError::TweetNotFound)
    }

    // Follow operations

    /// Establish a follow edge unconditionally (upsert)
    pub async fn follow(&self, follower_id: &str, followee_id: &str) {
        let mut inner = self.inner.write().await;
        inner
            .follows
            .entry(follower_id.to_string())
            .or_default()
            .insert(followee_id.to_string());
    }

    /// Establish a follow edge only if absent
    ///
    /// The membership test and the insertion happen under one write-lock
    /// critical section: of N concurrent callers on the same edge exactly
    /// one succeeds, the rest observe AlreadyFollowing.
    pub async fn follow_if_not_exists(
        &self,
        follower_id: &str,
        followee_id: &str,
    ) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;

        if let Some(followees) = inner.follows.get(follower_id) {
            if followees.contains(followee_id) {
                return Err(DomainError::AlreadyFollowing);
            }
        }

        inner
            .follows
            .entry(follower_id.to_string())
            .or_default()
            .insert(followee_id.to_string());
        Ok(())
    }

    /// Remove a follow edge unconditionally
    pub async fn unfollow(&self, follower_id: &str, followee_id: &str) {
        let mut inner = self.inner.write().await;
        if let Some(followees) = inner.follows.get_mut(follower_id) {
            followees.remove(followee_id);
            if followees.is_empty() {
                inner.follows.remove(follower_id);
            }
        }
    }

    /// Remove a follow edge only if present
    ///
    /// Symmetric guarantee to [`Self::follow_if_not_exists`]: exactly one
    /// of N concurrent callers succeeds, the rest observe NotFollowing.
    pub async fn unfollow_if_exists(
        &self,
        follower_id: &str,
        followee_id: &str,
    ) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;

        let Some(followees) = inner.follows.get_mut(follower_id) else {
            return Err(DomainError::NotFollowing);
        };
        if !followees.remove(followee_id) {
            return Err(DomainError::NotFollowing);
        }
        if followees.is_empty() {
            inner.follows.remove(follower_id);
        }
        Ok(())
    }

    /// Ids of users following `user_id` (unordered)
    pub async fn get_followers(&self, user_id: &str) -> Vec<String> {
        let inner = self.inner.read().await;
        inner
            .follows
            .iter()
            .filter(|(_, followees)| followees.contains(user_id))
            .map(|(follower_id, _)| follower_id.clone())
            .collect()
    }

    /// Ids of users that `user_id` follows (unordered)
    pub async fn get_following(&self, user_id: &str) -> Vec<String> {
        let inner = self.inner.read().await;
        inner
            .follows
            .get(user_id)
            .map(|followees| followees.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Membership test; an unknown follower implies false
    pub async fn is_following(&self, follower_id: &str, followee_id: &str) -> bool {
        let inner = self.inner.read().await;
        inner
            .follows
            .get(follower_id)
            .map(|followees| followees.contains(followee_id))
            .unwrap_or(false)
    }

    // User operations

    /// Insert a user keyed by id (upsert)
    pub async fn create_user(&self, user: User) {
        let mut inner = self.inner.write().await;
        inner.users.insert(user.id.clone(), user);
    }

    /// Look up a user by id
    pub async fn get_user_by_id(&self, id: &str) -> Result<User, DomainError> {
        let inner = self.inner.read().await;
        inner.users.get(id).cloned().ok_or(DomainError::UserNotFound)
    }

    /// Look up a user by username (first match; uniqueness is by
    /// convention, not enforced)
    pub async fn get_user_by_username(&self, username: &str) -> Result<User, DomainError> {
        let inner = self.inner.read().await;
        inner
            .users
            .values()
            .find(|user| user.username == username)
            .cloned()
            .ok_or(DomainError::UserNotFound)
    }

    /// Existence check used as a precondition gate by the services
    pub async fn user_exists(&self, id: &str) -> bool {
        let inner = self.inner.read().await;
        inner.users.contains_key(id)
    }

    /// Insert a few well-known users for local runs and demos
    pub async fn seed_demo_users(&self) {
        let mut inner = self.inner.write().await;
        for (id, username) in [("user1", "alice"), ("user2", "bob"), ("user3", "charlie")] {
            inner.users.entry(id.to_string()).or_insert_with(|| User {
                id: id.to_string(),
                username: username.to_string(),
                created_at: Utc::now(),
            });
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Sort most recent first; equal timestamps fall back to insertion order
fn sort_descending(tweets: &mut [&StoredTweet]) {
    tweets.sort_by(|a, b| {
        b.tweet
            .created_at
            .cmp(&a.tweet.created_at)
            .then(b.seq.cmp(&a.seq))
    });
}
