//! User accounts service
//!
//! Registration, lookup, partial update, deletion and password reset requests
//! for user accounts, exposed over HTTP.

pub mod config;
pub mod database;
pub mod error;
pub mod extract;
pub mod models;
pub mod notifier;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod service;
pub mod state;

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::{
    config::{AppConfig, StorageBackend},
    notifier::{LogNotifier, Notifier, WebhookNotifier},
    password::Argon2Hasher,
    repositories::{InMemoryUserRepository, PgUserRepository, UserRepository},
    service::UserService,
    state::AppState,
};

/// Wire the collaborators selected by `config` into the application state
pub async fn build_state(config: &AppConfig) -> Result<AppState> {
    let repository: Arc<dyn UserRepository> = match config.storage {
        StorageBackend::Postgres => {
            let pool = database::connect().await?;
            Arc::new(PgUserRepository::new(pool))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; users are lost on restart");
            Arc::new(InMemoryUserRepository::new())
        }
    };

    let notifier: Arc<dyn Notifier> = match &config.notifier.webhook_url {
        Some(url) => {
            info!("Password reset webhook: {}", url);
            Arc::new(WebhookNotifier::new(url.clone()))
        }
        None => Arc::new(LogNotifier),
    };

    let user_service = UserService::new(repository, Arc::new(Argon2Hasher::new()), notifier);
    Ok(AppState { user_service })
}
