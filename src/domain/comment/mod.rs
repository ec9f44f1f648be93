//! Comment domain

mod entity;
mod repository;

pub use entity::{Comment, CommentId, NewComment};
pub use repository::CommentRepository;

#[cfg(test)]
pub use repository::MockCommentRepository;
