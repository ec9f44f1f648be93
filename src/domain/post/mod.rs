//! Post domain

mod entity;
mod repository;
mod validation;

pub use entity::{NewPost, Post, PostId};
pub use repository::PostRepository;
pub use validation::{validate_comment, validate_post, PostValidationError};

#[cfg(test)]
pub use repository::MockPostRepository;
