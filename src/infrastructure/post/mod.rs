//! Post infrastructure module

mod postgres_repository;
mod repository;

pub use postgres_repository::PostgresPostRepository;
pub use repository::InMemoryPostRepository;
