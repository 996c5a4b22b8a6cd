//! Chirp - a lightweight in-memory social-feed backend
//!
//! Users post short messages, follow each other and read a
//! reverse-chronological timeline merged from everyone they follow plus
//! themselves. The crate is organized with strong cohesion and loose
//! coupling:
//! - `domain` holds the validated value types and error taxonomy
//! - `store` is the single concurrency-safe source of truth
//! - `service` orchestrates use cases over the store and collaborators
//! - `cache` and `logger` are capability seams with no-op implementations
//! - `web` is a thin HTTP transport adapter

pub mod cache;
pub mod config;
pub mod domain;
pub mod logger;
pub mod service;
pub mod store;
pub mod web;

/// Re-export commonly used types
pub use cache::{InMemoryTimelineCache, InvalidationQueue, NoopCache, TimelineCache};
pub use config::Config;
pub use domain::{DomainError, Follow, Tweet, User, MAX_TIMELINE_LIMIT, MAX_TWEET_LENGTH};
pub use logger::{Logger, NoopLogger, TracingLogger};
pub use service::{FollowService, TweetService};
pub use store::MemoryStore;
