//! Comment infrastructure module

mod postgres_repository;
mod repository;

pub use postgres_repository::PostgresCommentRepository;
pub use repository::InMemoryCommentRepository;
