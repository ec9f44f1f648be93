//! PMP Blog
//!
//! A multi-user blogging service with:
//! - Salted password digests and HMAC-signed session cookies
//! - Posts, per-post comments and idempotent likes
//! - Ownership-gated editing and deletion
//! - In-memory or PostgreSQL storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::{
    auth::{build_password_hasher, SessionManager, TokenSigner},
    content::ContentService,
    storage::{BlogRepositories, StorageFactory},
    user::UserService,
};
use tracing::info;

/// Wire services over an existing set of repositories
pub fn build_app_state(repositories: BlogRepositories, config: &AppConfig) -> AppState {
    let hasher = build_password_hasher(config.password.scheme);

    let user_service = UserService::new(repositories.users.clone(), hasher);
    let content_service = ContentService::new(repositories.posts, repositories.comments);
    let session_manager = SessionManager::new(
        TokenSigner::new(&config.session.secret),
        repositories.users,
        config.session.cookie_name.clone(),
    );

    AppState::new(
        Arc::new(user_service),
        Arc::new(content_service),
        Arc::new(session_manager),
    )
}

/// Create the application state for the configured storage backend
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    config.validate()?;

    let storage = config.storage.to_storage_config()?;
    info!(backend = ?storage.storage_type(), password_scheme = ?config.password.scheme, "Creating application state");

    let repositories = StorageFactory::create(&storage).await?;

    Ok(build_app_state(repositories, config))
}
