//! Integration tests for the PostgreSQL user repository
//!
//! These run the service migrations against a live database and check the
//! behaviour the service relies on: constraint names, the columns an update may
//! touch, and listing order. They need a running server, so they only run with
//! `cargo test -- --ignored`.

use common::{
    database::{DatabaseConfig, init_pool},
    error::DatabaseError,
};
use sqlx::PgPool;
use uuid::Uuid;

use users::{
    database::run_migrations,
    models::{DEFAULT_ROLE, NewUser},
    repositories::{EMAIL_CONSTRAINT, PgUserRepository, USERNAME_CONSTRAINT, UserRepository},
};

type TestResult = Result<(), Box<dyn std::error::Error>>;

async fn migrated_pool() -> Result<PgPool, Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// Emails and usernames unique to one test run, so reruns don't collide
fn new_user(tag: &str) -> NewUser {
    let suffix = Uuid::new_v4().simple().to_string();
    NewUser {
        email: format!("{}-{}@example.com", tag, suffix),
        username: format!("{}-{}", tag, suffix),
        full_name: "Integration User".to_string(),
        password_hash: "hashed".to_string(),
        role: DEFAULT_ROLE.to_string(),
        status: true,
        phone_number: None,
        birth_date: None,
        profile_picture_url: None,
    }
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL server"]
async fn test_duplicates_report_constraint_names() -> TestResult {
    let repo = PgUserRepository::new(migrated_pool().await?);
    let first = repo.create(new_user("dup")).await?;

    let mut same_email = new_user("dup");
    same_email.email = first.email.clone();
    let err = repo.create(same_email).await.unwrap_err();
    assert!(
        matches!(err, DatabaseError::UniqueViolation(ref c) if c == EMAIL_CONSTRAINT),
        "unexpected error: {:?}",
        err
    );

    let mut same_username = new_user("dup");
    same_username.username = first.username.clone();
    let err = repo.create(same_username).await.unwrap_err();
    assert!(
        matches!(err, DatabaseError::UniqueViolation(ref c) if c == USERNAME_CONSTRAINT),
        "unexpected error: {:?}",
        err
    );

    let second = repo.create(new_user("dup")).await?;
    let mut clash = second.clone();
    clash.username = first.username.clone();
    let err = repo.update(&clash).await.unwrap_err();
    assert!(matches!(err, DatabaseError::UniqueViolation(ref c) if c == USERNAME_CONSTRAINT));

    repo.delete_by_id(first.id).await?;
    repo.delete_by_id(second.id).await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL server"]
async fn test_update_keeps_role_and_status() -> TestResult {
    let repo = PgUserRepository::new(migrated_pool().await?);
    let mut user = repo.create(new_user("upd")).await?;

    user.full_name = "Renamed".to_string();
    user.phone_number = Some("555-0100".to_string());
    user.role = "ADMIN".to_string();
    user.status = false;
    let updated = repo.update(&user).await?.expect("user should exist");

    assert_eq!(updated.full_name, "Renamed");
    assert_eq!(updated.phone_number.as_deref(), Some("555-0100"));
    assert_eq!(updated.role, DEFAULT_ROLE);
    assert!(updated.status);
    assert!(updated.updated_at >= updated.created_at);

    repo.delete_by_id(user.id).await?;
    assert!(repo.update(&user).await?.is_none());
    assert!(!repo.exists_by_id(user.id).await?);
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL server"]
async fn test_find_all_orders_by_creation() -> TestResult {
    let repo = PgUserRepository::new(migrated_pool().await?);
    let mut ids = Vec::new();
    for _ in 0..3 {
        ids.push(repo.create(new_user("order")).await?.id);
    }

    let all = repo.find_all().await?;
    assert!(
        all.windows(2)
            .all(|w| (w[0].created_at, w[0].id) <= (w[1].created_at, w[1].id)),
        "users are not ordered by (created_at, id)"
    );
    for id in &ids {
        assert!(all.iter().any(|u| u.id == *id));
    }

    for id in ids {
        repo.delete_by_id(id).await?;
    }
    Ok(())
}
