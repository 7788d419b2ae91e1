//! PostgreSQL user repository

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use super::UserRepository;
use crate::models::{NewUser, User};

const USER_COLUMNS: &str = "id, email, username, full_name, password_hash, role, status, \
     phone_number, birth_date, profile_picture_url, created_at, updated_at";

/// User repository backed by the `users` table
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one_by(&self, column: &str, value: &str) -> DatabaseResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE {} = $1", USER_COLUMNS, column);
        sqlx::query_as::<_, User>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from_query)
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        debug!("Finding user by ID: {}", id);

        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from_query)
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        debug!("Finding user by email");
        self.find_one_by("email", email).await
    }

    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        debug!("Finding user by username");
        self.find_one_by("username", username).await
    }

    async fn find_all(&self) -> DatabaseResult<Vec<User>> {
        let sql = format!(
            "SELECT {} FROM users ORDER BY created_at ASC, id ASC",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from_query)
    }

    async fn exists_by_id(&self, id: Uuid) -> DatabaseResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from_query)
    }

    async fn create(&self, new_user: NewUser) -> DatabaseResult<User> {
        info!("Creating new user: {}", new_user.username);

        let sql = format!(
            r#"
            INSERT INTO users (email, username, full_name, password_hash, role, status,
                               phone_number, birth_date, profile_picture_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(&new_user.email)
            .bind(&new_user.username)
            .bind(&new_user.full_name)
            .bind(&new_user.password_hash)
            .bind(&new_user.role)
            .bind(new_user.status)
            .bind(&new_user.phone_number)
            .bind(new_user.birth_date)
            .bind(&new_user.profile_picture_url)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from_query)
    }

    async fn update(&self, user: &User) -> DatabaseResult<Option<User>> {
        info!("Updating user: {}", user.id);

        // role and status are deliberately absent from the SET list
        let sql = format!(
            r#"
            UPDATE users
            SET email = $2, username = $3, full_name = $4, password_hash = $5,
                phone_number = $6, birth_date = $7, profile_picture_url = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.username)
            .bind(&user.full_name)
            .bind(&user.password_hash)
            .bind(&user.phone_number)
            .bind(user.birth_date)
            .bind(&user.profile_picture_url)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from_query)
    }

    async fn delete_by_id(&self, id: Uuid) -> DatabaseResult<()> {
        info!("Deleting user: {}", id);

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;
        Ok(())
    }
}
