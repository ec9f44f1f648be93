//! Storage factory for runtime backend selection

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::comment::CommentRepository;
use crate::domain::post::PostRepository;
use crate::domain::user::UserRepository;
use crate::domain::DomainError;
use crate::infrastructure::comment::{InMemoryCommentRepository, PostgresCommentRepository};
use crate::infrastructure::post::{InMemoryPostRepository, PostgresPostRepository};
use crate::infrastructure::user::{InMemoryUserRepository, PostgresUserRepository};

use super::migrations::run_blog_migrations;
use super::postgres::{connect_pool, PostgresConfig};

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl FromStr for StorageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            other => Err(DomainError::configuration(format!(
                "Unknown storage backend '{}'",
                other
            ))),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// In-memory storage configuration
    InMemory,
    /// PostgreSQL storage configuration
    Postgres(PostgresConfig),
}

impl StorageConfig {
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    pub fn postgres(config: PostgresConfig) -> Self {
        Self::Postgres(config)
    }

    /// Creates a PostgreSQL configuration from a URL
    pub fn postgres_url(url: impl Into<String>) -> Self {
        Self::Postgres(PostgresConfig::new(url))
    }

    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// The three repositories backing the blog, sharing one backend
#[derive(Debug, Clone)]
pub struct BlogRepositories {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

/// Factory for creating repository sets
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates repositories for the configured backend.
    ///
    /// PostgreSQL schemas are migrated before the repositories are returned.
    pub async fn create(config: &StorageConfig) -> Result<BlogRepositories, DomainError> {
        match config {
            StorageConfig::InMemory => Ok(Self::create_in_memory()),
            StorageConfig::Postgres(pg_config) => {
                let pool = connect_pool(pg_config).await?;
                run_blog_migrations(&pool).await?;

                Ok(BlogRepositories {
                    users: Arc::new(PostgresUserRepository::new(pool.clone())),
                    posts: Arc::new(PostgresPostRepository::new(pool.clone())),
                    comments: Arc::new(PostgresCommentRepository::new(pool)),
                })
            }
        }
    }

    pub fn create_in_memory() -> BlogRepositories {
        BlogRepositories {
            users: Arc::new(InMemoryUserRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
        }
    }
}
