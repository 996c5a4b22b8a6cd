//! Domain error definitions

use std::fmt;

/// Errors produced by entity validation and the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A user id was empty or otherwise unusable
    InvalidUserId,

    /// Tweet content was empty
    EmptyContent,

    /// Tweet content exceeded the maximum length
    ContentTooLong,

    /// The referenced user does not exist
    UserNotFound,

    /// The referenced tweet does not exist
    TweetNotFound,

    /// The follow edge already exists
    AlreadyFollowing,

    /// The follow edge does not exist
    NotFollowing,

    /// A user attempted to follow themselves
    CannotFollowSelf,
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::InvalidUserId => write!(f, "invalid user ID"),
            DomainError::EmptyContent => write!(f, "tweet content cannot be empty"),
            DomainError::ContentTooLong => write!(f, "tweet content exceeds maximum length"),
            DomainError::UserNotFound => write!(f, "user not found"),
            DomainError::TweetNotFound => write!(f, "tweet not found"),
            DomainError::AlreadyFollowing => write!(f, "already following this user"),
            DomainError::NotFollowing => write!(f, "not following this user"),
            DomainError::CannotFollowSelf => write!(f, "cannot follow yourself"),
        }
    }
}

impl std::error::Error for DomainError {}
