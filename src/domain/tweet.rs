//! Tweet entity

use super::{DomainError, MAX_TWEET_LENGTH};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// A short message posted by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    /// System-generated opaque id (128 random bits, hex encoded)
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Tweet {
    /// Create a new tweet, validating the author id and content bounds
    ///
    /// Content must be 1..=280 bytes. The id and timestamp are assigned
    /// at construction.
    pub fn new(user_id: impl Into<String>, content: impl Into<String>) -> Result<Self, DomainError> {
        let user_id = user_id.into();
        let content = content.into();

        if user_id.is_empty() {
            return Err(DomainError::InvalidUserId);
        }

        if content.is_empty() {
            return Err(DomainError::EmptyContent);
        }

        if content.len() > MAX_TWEET_LENGTH {
            return Err(DomainError::ContentTooLong);
        }

        Ok(Tweet {
            id: generate_id(),
            user_id,
            content,
            created_at: Utc::now(),
        })
    }
}

/// Generate a globally unique tweet id: 16 random bytes, hex encoded
fn generate_id() -> String {
    let bytes: [u8; 16] = rand::random();
    bytes.iter().fold(String::with_capacity(32), |mut out, b| {
        let _ = write!(out, "{:02x}", b);
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tweet() {
        let tweet = Tweet::new("user1", "hello world").unwrap();
        assert_eq!(tweet.user_id, "user1");
        assert_eq!(tweet.content, "hello world");
        assert_eq!(tweet.id.len(), 32);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Tweet::new("user1", "a").unwrap();
        let b = Tweet::new("user1", "b").unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_empty_user_id_rejected() {
        assert_eq!(Tweet::new("", "hello"), Err(DomainError::InvalidUserId));
    }

    #[test]
    fn test_content_bounds() {
        assert_eq!(Tweet::new("user1", ""), Err(DomainError::EmptyContent));

        let exactly_max = "x".repeat(MAX_TWEET_LENGTH);
        assert!(Tweet::new("user1", exactly_max).is_ok());

        let too_long = "x".repeat(MAX_TWEET_LENGTH + 1);
        assert_eq!(Tweet::new("user1", too_long), Err(DomainError::ContentTooLong));
    }
}
