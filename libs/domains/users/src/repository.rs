use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserProfile};

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; fails with `DuplicateEmail` when the email is taken
    async fn create(&self, user: User) -> UserResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Get a user by normalized email
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// All users, newest first, without credential hashes
    async fn list(&self) -> UserResult<Vec<UserProfile>>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::DuplicateEmail(user.email));
        }

        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> UserResult<Vec<UserProfile>> {
        let users = self.users.read().await;

        let mut result: Vec<UserProfile> = users.values().cloned().map(Into::into).collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use chrono::Duration;

    fn user(email: &str) -> User {
        User::new(
            "Test User".to_string(),
            email.to_string(),
            "hashed_password".to_string(),
            Role::User,
        )
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let repo = InMemoryUserRepository::new();

        let created = repo.create(user("test@example.com")).await.unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.email, "test@example.com");

        let by_email = repo.get_by_email("test@example.com").await.unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(created.id));
    }

    #[tokio::test]
    async fn test_duplicate_email_error() {
        let repo = InMemoryUserRepository::new();

        repo.create(user("test@example.com")).await.unwrap();
        let result = repo.create(user("test@example.com")).await;

        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = InMemoryUserRepository::new();

        let mut older = user("old@example.com");
        older.created_at -= Duration::days(1);
        repo.create(older).await.unwrap();
        repo.create(user("new@example.com")).await.unwrap();

        let listed = repo.list().await.unwrap();
        let emails: Vec<&str> = listed.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, ["new@example.com", "old@example.com"]);
    }
}
