//! Domain layer - Core business logic and entities

pub mod authorization;
pub mod comment;
pub mod error;
pub mod post;
pub mod session;
pub mod user;

pub use authorization::{can_mutate, ensure_can_mutate};
pub use comment::{Comment, CommentId, CommentRepository, NewComment};
pub use error::DomainError;
pub use post::{NewPost, Post, PostId, PostRepository};
pub use session::Identity;
pub use user::{NewUser, User, UserId, UserRepository};
