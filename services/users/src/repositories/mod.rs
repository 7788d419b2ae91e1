//! Repositories for user storage

use async_trait::async_trait;
use common::error::DatabaseResult;
use uuid::Uuid;

use crate::models::{NewUser, User};

pub mod memory;
pub mod user;

pub use memory::InMemoryUserRepository;
pub use user::PgUserRepository;

/// Unique constraint guarding `users.email`
pub const EMAIL_CONSTRAINT: &str = "users_email_key";
/// Unique constraint guarding `users.username`
pub const USERNAME_CONSTRAINT: &str = "users_username_key";

/// Storage contract for user records
///
/// Implementations must enforce email and username uniqueness themselves and
/// report a clash as `DatabaseError::UniqueViolation`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>>;

    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>>;

    /// All users, oldest first
    async fn find_all(&self) -> DatabaseResult<Vec<User>>;

    /// Check if a user ID exists
    async fn exists_by_id(&self, id: Uuid) -> DatabaseResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// Insert a new user; storage assigns the ID and timestamps
    async fn create(&self, new_user: NewUser) -> DatabaseResult<User>;

    /// Overwrite an existing user's mutable columns
    ///
    /// Returns `None` when no row with `user.id` exists any more.
    async fn update(&self, user: &User) -> DatabaseResult<Option<User>>;

    /// Remove a user permanently
    async fn delete_by_id(&self, id: Uuid) -> DatabaseResult<()>;
}
