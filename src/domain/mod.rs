//! Domain entities and business rules
//!
//! Immutable-after-construction value types with validating constructors.
//! This module is independent of storage and transport (loose coupling).

mod error;
mod follow;
mod tweet;
mod user;

pub use error::DomainError;
pub use follow::Follow;
pub use tweet::Tweet;
pub use user::User;

/// Maximum tweet content length in bytes
pub const MAX_TWEET_LENGTH: usize = 280;

/// Maximum number of tweets returned by a single timeline read
pub const MAX_TIMELINE_LIMIT: usize = 100;
