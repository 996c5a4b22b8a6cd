//! Follow relationship entity

use super::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A directed follow edge: follower → followee
///
/// The store tracks edge presence only; `created_at` here is
/// informational and not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Follow {
    pub follower_id: String,
    pub followee_id: String,
    pub created_at: DateTime<Utc>,
}

impl Follow {
    /// Create a follow edge, rejecting empty ids and self-follow
    pub fn new(
        follower_id: impl Into<String>,
        followee_id: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let follower_id = follower_id.into();
        let followee_id = followee_id.into();

        if follower_id.is_empty() || followee_id.is_empty() {
            return Err(DomainError::InvalidUserId);
        }

        if follower_id == followee_id {
            return Err(DomainError::CannotFollowSelf);
        }

        Ok(Follow {
            follower_id,
            followee_id,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_follow() {
        let follow = Follow::new("user1", "user2").unwrap();
        assert_eq!(follow.follower_id, "user1");
        assert_eq!(follow.followee_id, "user2");
    }

    #[test]
    fn test_empty_ids_rejected() {
        assert_eq!(Follow::new("", "user2"), Err(DomainError::InvalidUserId));
        assert_eq!(Follow::new("user1", ""), Err(DomainError::InvalidUserId));
    }

    #[test]
    fn test_self_follow_rejected() {
        assert_eq!(Follow::new("user1", "user1"), Err(DomainError::CannotFollowSelf));
    }
}
