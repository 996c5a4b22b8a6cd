//! User entity

use super::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user
///
/// Ids are externally assigned and unique. Usernames are unique by
/// convention but not enforced by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user, rejecting empty ids and usernames
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let username = username.into();

        if id.is_empty() || username.is_empty() {
            return Err(DomainError::InvalidUserId);
        }

        Ok(User {
            id,
            username,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user() {
        let user = User::new("user1", "alice").unwrap();
        assert_eq!(user.id, "user1");
        assert_eq!(user.username, "alice");
    }

    #[test]
    fn test_empty_id_rejected() {
        assert_eq!(User::new("", "alice"), Err(DomainError::InvalidUserId));
        assert_eq!(User::new("user1", ""), Err(DomainError::InvalidUserId));
    }
}
