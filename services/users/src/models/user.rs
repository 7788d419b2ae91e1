//! User model and related payloads

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Role assigned to every registered user
pub const DEFAULT_ROLE: &str = "USER";

/// User entity
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub full_name: String,
    /// Argon2 hash, never exposed in JSON
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub status: bool,
    pub phone_number: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub profile_picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration candidate as submitted by a client
///
/// `password` is optional on the wire so that a missing password is reported
/// as a validation failure rather than a malformed body.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUser {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub password: Option<String>,
    pub phone_number: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub profile_picture_url: Option<String>,
}

/// New user creation payload handed to storage
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub password_hash: String,
    pub role: String,
    pub status: bool,
    pub phone_number: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub profile_picture_url: Option<String>,
}

/// User update payload; `None` leaves the stored value untouched
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateUser {
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone_number: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub profile_picture_url: Option<String>,
}

/// Password reset request body
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}
