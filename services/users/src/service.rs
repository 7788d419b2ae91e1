//! User account orchestration
//!
//! Every rule about what may be stored lives here: uniqueness of email and
//! username, non-empty passwords, the forced role and status on registration,
//! and the field-by-field merge applied by [`UserService::update`].

use std::sync::Arc;

use common::error::DatabaseError;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::{ServiceResult, UserServiceError},
    models::{DEFAULT_ROLE, NewUser, RegisterUser, UpdateUser, User},
    notifier::Notifier,
    password::PasswordHasher,
    repositories::{EMAIL_CONSTRAINT, USERNAME_CONSTRAINT, UserRepository},
};

const EMAIL_TAKEN: &str = "Email already registered";
const USERNAME_TAKEN: &str = "Username already taken";
const EMPTY_PASSWORD: &str = "Password cannot be empty";
const USER_NOT_FOUND: &str = "User not found";

/// User service
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    notifier: Arc<dyn Notifier>,
}

impl UserService {
    /// Create a new user service
    pub fn new(
        repository: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            repository,
            hasher,
            notifier,
        }
    }

    /// Register a new user
    ///
    /// Rejects taken emails and usernames and missing or empty passwords. The
    /// stored user always gets role `USER` and an active status.
    pub async fn register(&self, candidate: RegisterUser) -> ServiceResult<User> {
        if self
            .repository
            .find_by_email(&candidate.email)
            .await?
            .is_some()
        {
            warn!(username = %candidate.username, "registration with taken email");
            return Err(UserServiceError::Validation(EMAIL_TAKEN.to_string()));
        }

        if self
            .repository
            .find_by_username(&candidate.username)
            .await?
            .is_some()
        {
            warn!(username = %candidate.username, "registration with taken username");
            return Err(UserServiceError::Validation(USERNAME_TAKEN.to_string()));
        }

        let password = match candidate.password.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => return Err(UserServiceError::Validation(EMPTY_PASSWORD.to_string())),
        };

        let new_user = NewUser {
            password_hash: self.hash(password)?,
            email: candidate.email,
            username: candidate.username,
            full_name: candidate.full_name,
            role: DEFAULT_ROLE.to_string(),
            status: true,
            phone_number: candidate.phone_number,
            birth_date: candidate.birth_date,
            profile_picture_url: candidate.profile_picture_url,
        };

        let user = self
            .repository
            .create(new_user)
            .await
            .map_err(uniqueness_to_validation)?;

        info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
        Ok(self.repository.find_by_email(email).await?)
    }

    /// Find a user by username
    pub async fn find_by_username(&self, username: &str) -> ServiceResult<Option<User>> {
        Ok(self.repository.find_by_username(username).await?)
    }

    /// List every stored user
    pub async fn list_all(&self) -> ServiceResult<Vec<User>> {
        Ok(self.repository.find_all().await?)
    }

    /// Apply a partial update to an existing user
    ///
    /// Fields are merged in a fixed order and the first failing rule aborts
    /// the whole update before anything is written.
    pub async fn update(&self, id: Uuid, patch: UpdateUser) -> ServiceResult<User> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserServiceError::NotFound(USER_NOT_FOUND.to_string()))?;

        if let Some(full_name) = patch.full_name {
            user.full_name = full_name;
        }

        if let Some(username) = patch.username {
            if username != user.username
                && self.repository.find_by_username(&username).await?.is_some()
            {
                warn!(user_id = %id, %username, "update to taken username");
                return Err(UserServiceError::Validation(USERNAME_TAKEN.to_string()));
            }
            user.username = username;
        }

        if let Some(email) = patch.email {
            if email != user.email && self.repository.find_by_email(&email).await?.is_some() {
                warn!(user_id = %id, "update to taken email");
                return Err(UserServiceError::Validation(EMAIL_TAKEN.to_string()));
            }
            user.email = email;
        }

        if let Some(password) = patch.password {
            if password.is_empty() {
                return Err(UserServiceError::Validation(EMPTY_PASSWORD.to_string()));
            }
            user.password_hash = self.hash(&password)?;
        }

        if let Some(phone_number) = patch.phone_number {
            user.phone_number = Some(phone_number);
        }

        if let Some(birth_date) = patch.birth_date {
            user.birth_date = Some(birth_date);
        }

        if let Some(profile_picture_url) = patch.profile_picture_url {
            user.profile_picture_url = Some(profile_picture_url);
        }

        let user = self
            .repository
            .update(&user)
            .await
            .map_err(uniqueness_to_validation)?
            .ok_or_else(|| UserServiceError::NotFound(USER_NOT_FOUND.to_string()))?;

        info!(user_id = %user.id, "user updated");
        Ok(user)
    }

    /// Delete a user permanently
    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        if !self.repository.exists_by_id(id).await? {
            return Err(UserServiceError::NotFound(USER_NOT_FOUND.to_string()));
        }

        self.repository.delete_by_id(id).await?;
        info!(user_id = %id, "user deleted");
        Ok(())
    }

    /// Send a password reset message to a registered email
    pub async fn request_password_reset(&self, email: &str) -> ServiceResult<()> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| UserServiceError::NotFound(USER_NOT_FOUND.to_string()))?;

        self.notifier
            .send_password_reset(&user.email)
            .await
            .map_err(UserServiceError::Notification)?;

        info!(user_id = %user.id, "password reset requested");
        Ok(())
    }

    fn hash(&self, password: &str) -> ServiceResult<String> {
        self.hasher
            .hash(password)
            .map_err(|e| UserServiceError::Hashing(e.to_string()))
    }
}

/// A write that lost a uniqueness race reports the same error as the pre-check.
fn uniqueness_to_validation(err: DatabaseError) -> UserServiceError {
    match err {
        DatabaseError::UniqueViolation(constraint) if constraint == EMAIL_CONSTRAINT => {
            UserServiceError::Validation(EMAIL_TAKEN.to_string())
        }
        DatabaseError::UniqueViolation(constraint) if constraint == USERNAME_CONSTRAINT => {
            UserServiceError::Validation(USERNAME_TAKEN.to_string())
        }
        other => UserServiceError::Database(other),
    }
}
