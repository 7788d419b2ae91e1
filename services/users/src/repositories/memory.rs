//! In-process user repository
//!
//! Keeps users in insertion order behind a `tokio::sync::RwLock`. Uniqueness is
//! re-checked under the write lock, so concurrent registrations that both pass
//! the service's pre-check still cannot store duplicates.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{EMAIL_CONSTRAINT, USERNAME_CONSTRAINT, UserRepository};
use crate::models::{NewUser, User};

/// Memory-backed user repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    fn check_unique(
        users: &[User],
        id: Option<Uuid>,
        email: &str,
        username: &str,
    ) -> DatabaseResult<()> {
        for other in users.iter().filter(|u| Some(u.id) != id) {
            if other.email == email {
                return Err(DatabaseError::UniqueViolation(EMAIL_CONSTRAINT.to_string()));
            }
            if other.username == username {
                return Err(DatabaseError::UniqueViolation(
                    USERNAME_CONSTRAINT.to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_all(&self) -> DatabaseResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn create(&self, new_user: NewUser) -> DatabaseResult<User> {
        let mut users = self.users.write().await;
        Self::check_unique(&users, None, &new_user.email, &new_user.username)?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            username: new_user.username,
            full_name: new_user.full_name,
            password_hash: new_user.password_hash,
            role: new_user.role,
            status: new_user.status,
            phone_number: new_user.phone_number,
            birth_date: new_user.birth_date,
            profile_picture_url: new_user.profile_picture_url,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> DatabaseResult<Option<User>> {
        let mut users = self.users.write().await;
        let Some(index) = users.iter().position(|u| u.id == user.id) else {
            return Ok(None);
        };
        Self::check_unique(&users, Some(user.id), &user.email, &user.username)?;

        let stored = &mut users[index];

        stored.email = user.email.clone();
        stored.username = user.username.clone();
        stored.full_name = user.full_name.clone();
        stored.password_hash = user.password_hash.clone();
        stored.phone_number = user.phone_number.clone();
        stored.birth_date = user.birth_date;
        stored.profile_picture_url = user.profile_picture_url.clone();
        stored.updated_at = Utc::now();

        Ok(Some(stored.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> DatabaseResult<()> {
        self.users.write().await.retain(|u| u.id != id);
        Ok(())
    }
}
