//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::{AuthError, DomainError};
use crate::domain::entities::user::User;

use super::trait_::UserRepository;

/// In-memory user repository for testing
///
/// Mirrors the production store's behavior closely enough for service
/// tests: the duplicate email check and the insert happen under a single
/// write lock, so concurrent `create` calls with the same email cannot
/// both succeed.
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    /// Make every subsequent call fail with an internal error
    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }

    /// Insert a user directly, bypassing the duplicate check (test setup)
    pub async fn seed(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Number of stored users
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }

    async fn check_failure(&self) -> Result<(), DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::Internal {
                message: "Simulated repository failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.check_failure().await?;
        let mut users = self.users.write().await;

        // Check-and-insert stays atomic under the write lock
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailExists.into());
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.check_failure().await?;
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        self.check_failure().await?;
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.phone == phone).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.check_failure().await?;
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        self.check_failure().await?;
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_password(&self, id: Uuid, new_hash: &str) -> Result<(), DomainError> {
        self.check_failure().await?;
        let mut users = self.users.write().await;

        match users.get_mut(&id) {
            Some(user) => {
                user.set_password_hash(new_hash.to_string());
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: "User".to_string(),
            }),
        }
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        self.check_failure().await?;
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email == email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(email: &str) -> User {
        User::new(
            "Avid Reader".to_string(),
            email.to_string(),
            "+15550100".to_string(),
            "1 Shelf Lane".to_string(),
            "$2b$04$hash".to_string(),
            "$2b$04$answer".to_string(),
        )
    }

    #[tokio::test]
    async fn test_create_and_find_by_email() {
        let repo = MockUserRepository::new();
        let user = sample_user("reader@bookverse.io");
        let created = repo.create(user.clone()).await.unwrap();
        assert_eq!(created.id, user.id);

        let found = repo.find_by_email("reader@bookverse.io").await.unwrap();
        assert_eq!(found.unwrap().email, "reader@bookverse.io");

        let missing = repo.find_by_email("other@bookverse.io").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let repo = MockUserRepository::new();
        repo.create(sample_user("reader@bookverse.io")).await.unwrap();

        let result = repo.create(sample_user("reader@bookverse.io")).await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::EmailExists))
        ));
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn test_find_by_phone() {
        let repo = MockUserRepository::new();
        repo.create(sample_user("reader@bookverse.io")).await.unwrap();

        let found = repo.find_by_phone("+15550100").await.unwrap();
        assert!(found.is_some());
        assert!(repo.find_by_phone("+15559999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_password_replaces_hash() {
        let repo = MockUserRepository::new();
        let user = repo.create(sample_user("reader@bookverse.io")).await.unwrap();

        repo.update_password(user.id, "$2b$04$replaced").await.unwrap();

        let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "$2b$04$replaced");
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let repo = MockUserRepository::new();
        let result = repo.update(sample_user("ghost@bookverse.io")).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_fail_forces_internal_error() {
        let repo = MockUserRepository::new();
        repo.set_should_fail(true).await;

        let result = repo.find_by_email("reader@bookverse.io").await;
        assert!(matches!(result, Err(DomainError::Internal { .. })));
    }
}
