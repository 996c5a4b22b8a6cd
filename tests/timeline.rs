//! End-to-end tests against the public service API, including the
//! contention cases the store must survive.

use chirp::cache::{InMemoryTimelineCache, InvalidationQueue, NoopCache, TimelineCache};
use chirp::domain::{DomainError, User};
use chirp::logger::{Logger, NoopLogger};
use chirp::service::{FollowService, TweetService};
use chirp::store::MemoryStore;
use std::sync::Arc;

struct Harness {
    store: Arc<MemoryStore>,
    tweets: Arc<TweetService>,
    follows: Arc<FollowService>,
}

fn harness_with_cache(cache: Arc<dyn TimelineCache>) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let logger: Arc<dyn Logger> = Arc::new(NoopLogger);
    let invalidations = InvalidationQueue::spawn(cache.clone(), logger.clone(), 256);

    Harness {
        tweets: Arc::new(TweetService::new(
            store.clone(),
            cache,
            invalidations.clone(),
            logger.clone(),
        )),
        follows: Arc::new(FollowService::new(store.clone(), invalidations, logger)),
        store,
    }
}

fn harness() -> Harness {
    harness_with_cache(Arc::new(NoopCache))
}

async fn create_user(store: &MemoryStore, id: &str, username: &str) {
    store.create_user(User::new(id, username).unwrap()).await;
}

#[tokio::test]
async fn timeline_scenario_alice_and_bob() {
    let h = harness();
    create_user(&h.store, "alice", "alice").await;
    create_user(&h.store, "bob", "bob").await;

    h.tweets.create_tweet("alice", "hi").await.unwrap();
    h.tweets.create_tweet("alice", "there").await.unwrap();
    h.follows.follow_user("bob", "alice").await.unwrap();

    let timeline = h.tweets.get_timeline("bob", 50).await.unwrap();
    let contents: Vec<&str> = timeline.iter().map(|t| t.content.as_str()).collect();
    assert_eq!(contents, vec!["there", "hi"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_tweet_creation_is_complete() {
    let h = harness();
    create_user(&h.store, "user1", "alice").await;

    const TASKS: usize = 20;
    const TWEETS_PER_TASK: usize = 10;

    let mut handles = Vec::new();
    for task in 0..TASKS {
        let tweets = h.tweets.clone();
        handles.push(tokio::spawn(async move {
            for i in 0..TWEETS_PER_TASK {
                tweets
                    .create_tweet("user1", &format!("tweet {} from task {}", i, task))
                    .await
                    .unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let tweets = h.tweets.get_user_tweets("user1").await.unwrap();
    assert_eq!(tweets.len(), TASKS * TWEETS_PER_TASK);

    let distinct: std::collections::HashSet<&str> =
        tweets.iter().map(|t| t.content.as_str()).collect();
    assert_eq!(distinct.len(), TASKS * TWEETS_PER_TASK);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_follow_unfollow_exactly_once() {
    let h = harness();
    create_user(&h.store, "user1", "alice").await;
    create_user(&h.store, "user2", "bob").await;

    const RACERS: usize = 50;

    let mut handles = Vec::new();
    for _ in 0..RACERS {
        let follows = h.follows.clone();
        handles.push(tokio::spawn(async move {
            follows.follow_user("user1", "user2").await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => successes += 1,
            Err(DomainError::AlreadyFollowing) => {}
            Err(other) => panic!("unexpected error: {}", other),
        }
    }
    assert_eq!(successes, 1);
    assert!(h.follows.is_following("user1", "user2").await.unwrap());

    let mut handles = Vec::new();
    for _ in 0..RACERS {
        let follows = h.follows.clone();
        handles.push(tokio::spawn(async move {
            follows.unfollow_user("user1", "user2").await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => successes += 1,
            Err(DomainError::NotFollowing) => {}
            Err(other) => panic!("unexpected error: {}", other),
        }
    }
    assert_eq!(successes, 1);
    assert!(!h.follows.is_following("user1", "user2").await.unwrap());
}

#[tokio::test]
async fn new_followee_tweets_show_up_after_cache_invalidation() {
    let cache = Arc::new(InMemoryTimelineCache::new());
    let h = harness_with_cache(cache.clone());
    create_user(&h.store, "user1", "alice").await;
    create_user(&h.store, "user2", "bob").await;

    // Prime bob's cached (empty) timeline, then follow alice.
    assert!(h.tweets.get_timeline("user2", 10).await.unwrap().is_empty());
    h.follows.follow_user("user2", "user1").await.unwrap();
    h.tweets.create_tweet("user1", "fresh").await.unwrap();

    // Invalidation is asynchronous; poll until the cached entry is gone,
    // then the next read recomputes from the store.
    for _ in 0..100 {
        if cache.get_timeline("user2").is_none() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    let timeline = h.tweets.get_timeline("user2", 10).await.unwrap();
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].content, "fresh");
}
