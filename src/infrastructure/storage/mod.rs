//! Storage infrastructure - backend selection, pooling and schema migrations

mod factory;
pub mod migrations;
mod postgres;

pub use factory::{BlogRepositories, StorageConfig, StorageFactory, StorageType};
pub use migrations::{
    blog_migrations, revert_blog_migrations, run_blog_migrations, Migration, PostgresMigrator,
};
pub use postgres::{connect_pool, PostgresConfig};
