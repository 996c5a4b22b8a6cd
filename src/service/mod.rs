//! Use-case services
//!
//! Orchestrate existence checks, entity construction, persistence and
//! best-effort cache maintenance on top of the store. Services hold no
//! mutable state of their own; the store owns all collections.

mod follows;
mod tweets;

pub use follows::FollowService;
pub use tweets::TweetService;
