//! Follow use cases: establishing and removing follow edges

use crate::cache::InvalidationQueue;
use crate::domain::{DomainError, Follow};
use crate::logger::Logger;
use crate::store::MemoryStore;
use std::sync::Arc;

/// Business logic for follow relationships
pub struct FollowService {
    store: Arc<MemoryStore>,
    invalidations: InvalidationQueue,
    logger: Arc<dyn Logger>,
}

impl FollowService {
    pub fn new(
        store: Arc<MemoryStore>,
        invalidations: InvalidationQueue,
        logger: Arc<dyn Logger>,
    ) -> Self {
        FollowService {
            store,
            invalidations,
            logger,
        }
    }

    /// Make `follower_id` follow `followee_id`
    ///
    /// Both users must exist; the edge must not already exist
    /// (AlreadyFollowing is propagated verbatim). A new edge only changes
    /// what the follower sees, so only the follower's own cached timeline
    /// is invalidated, without delaying the response.
    pub async fn follow_user(
        &self,
        follower_id: &str,
        followee_id: &str,
    ) -> Result<(), DomainError> {
        let follow = Follow::new(follower_id, followee_id)?;

        if !self.store.user_exists(follower_id).await {
            return Err(DomainError::UserNotFound);
        }
        if !self.store.user_exists(followee_id).await {
            return Err(DomainError::UserNotFound);
        }

        if let Err(err) = self
            .store
            .follow_if_not_exists(&follow.follower_id, &follow.followee_id)
            .await
        {
            if err == DomainError::AlreadyFollowing {
                return Err(err);
            }
            self.logger.error(
                "failed to create follow relationship",
                &err,
                &[
                    ("follower_id", follower_id.to_string()),
                    ("followee_id", followee_id.to_string()),
                ],
            );
            return Err(err);
        }

        self.invalidations.enqueue(follower_id);

        self.logger.info(
            "user followed",
            &[
                ("follower_id", follower_id.to_string()),
                ("followee_id", followee_id.to_string()),
            ],
        );
        Ok(())
    }

    /// Make `follower_id` stop following `followee_id`
    ///
    /// NotFollowing is propagated verbatim when the edge is absent.
    pub async fn unfollow_user(
        &self,
        follower_id: &str,
        followee_id: &str,
    ) -> Result<(), DomainError> {
        // Same validation rules as follow: empty ids and self-edges
        // are rejected before touching the store.
        let follow = Follow::new(follower_id, followee_id)?;

        if let Err(err) = self
            .store
            .unfollow_if_exists(&follow.follower_id, &follow.followee_id)
            .await
        {
            if err == DomainError::NotFollowing {
                return Err(err);
            }
            self.logger.error(
                "failed to unfollow user",
                &err,
                &[
                    ("follower_id", follower_id.to_string()),
                    ("followee_id", followee_id.to_string()),
                ],
            );
            return Err(err);
        }

        self.invalidations.enqueue(follower_id);

        self.logger.info(
            "user unfollowed",
            &[
                ("follower_id", follower_id.to_string()),
                ("followee_id", followee_id.to_string()),
            ],
        );
        Ok(())
    }

    /// Ids of users following `user_id`
    pub async fn get_followers(&self, user_id: &str) -> Result<Vec<String>, DomainError> {
        if user_id.is_empty() {
            return Err(DomainError::InvalidUserId);
        }
        Ok(self.store.get_followers(user_id).await)
    }

    /// Ids of users that `user_id` follows
    pub async fn get_following(&self, user_id: &str) -> Result<Vec<String>, DomainError> {
        if user_id.is_empty() {
            return Err(DomainError::InvalidUserId);
        }
        Ok(self.store.get_following(user_id).await)
    }

    /// Whether the follow edge exists
    pub async fn is_following(
        &self,
        follower_id: &str,
        followee_id: &str,
    ) -> Result<bool, DomainError> {
        if follower_id.is_empty() || followee_id.is_empty() {
            return Err(DomainError::InvalidUserId);
        }
        Ok(self.store.is_following(follower_id, followee_id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::NoopCache;
    use crate::domain::User;
    use crate::logger::NoopLogger;

    fn service() -> (Arc<MemoryStore>, FollowService) {
        let store = Arc::new(MemoryStore::new());
        let logger: Arc<dyn Logger> = Arc::new(NoopLogger);
        let invalidations = InvalidationQueue::spawn(Arc::new(NoopCache), logger.clone(), 64);
        let service = FollowService::new(store.clone(), invalidations, logger);
        (store, service)
    }

    async fn seed_users(store: &MemoryStore) {
        for (id, username) in [("user1", "alice"), ("user2", "bob")] {
            store.create_user(User::new(id, username).unwrap()).await;
        }
    }

    #[tokio::test]
    async fn test_follow_and_unfollow() {
        let (store, service) = service();
        seed_users(&store).await;

        service.follow_user("user1", "user2").await.unwrap();
        assert!(service.is_following("user1", "user2").await.unwrap());
        assert_eq!(
            service.get_following("user1").await.unwrap(),
            vec!["user2".to_string()]
        );
        assert_eq!(
            service.get_followers("user2").await.unwrap(),
            vec!["user1".to_string()]
        );

        service.unfollow_user("user1", "user2").await.unwrap();
        assert!(!service.is_following("user1", "user2").await.unwrap());
    }

    #[tokio::test]
    async fn test_self_follow_rejected_regardless_of_store_state() {
        let (store, service) = service();
        seed_users(&store).await;

        assert_eq!(
            service.follow_user("user1", "user1").await,
            Err(DomainError::CannotFollowSelf)
        );
        assert_eq!(
            service.unfollow_user("user1", "user1").await,
            Err(DomainError::CannotFollowSelf)
        );
    }

    #[tokio::test]
    async fn test_follow_requires_both_users() {
        let (store, service) = service();
        seed_users(&store).await;

        assert_eq!(
            service.follow_user("ghost", "user2").await,
            Err(DomainError::UserNotFound)
        );
        assert_eq!(
            service.follow_user("user1", "ghost").await,
            Err(DomainError::UserNotFound)
        );
    }

    #[tokio::test]
    async fn test_duplicate_follow_conflicts() {
        let (store, service) = service();
        seed_users(&store).await;

        service.follow_user("user1", "user2").await.unwrap();
        assert_eq!(
            service.follow_user("user1", "user2").await,
            Err(DomainError::AlreadyFollowing)
        );
    }

    #[tokio::test]
    async fn test_unfollow_without_edge() {
        let (store, service) = service();
        seed_users(&store).await;

        assert_eq!(
            service.unfollow_user("user1", "user2").await,
            Err(DomainError::NotFollowing)
        );
    }

    #[tokio::test]
    async fn test_empty_ids_rejected() {
        let (_store, service) = service();

        assert_eq!(
            service.follow_user("", "user2").await,
            Err(DomainError::InvalidUserId)
        );
        assert_eq!(
            service.unfollow_user("", "user2").await,
            Err(DomainError::InvalidUserId)
        );
        assert_eq!(
            service.unfollow_user("user1", "").await,
            Err(DomainError::InvalidUserId)
        );
        assert_eq!(
            service.get_followers("").await,
            Err(DomainError::InvalidUserId)
        );
        assert_eq!(
            service.get_following("").await,
            Err(DomainError::InvalidUserId)
        );
        assert_eq!(
            service.is_following("", "user2").await,
            Err(DomainError::InvalidUserId)
        );
    }
}
