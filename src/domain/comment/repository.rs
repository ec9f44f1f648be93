//! Comment repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Comment, CommentId, NewComment};
use crate::domain::post::PostId;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for comments. Every read is scoped to a parent post.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync + Debug {
    /// Create a comment under its parent post
    async fn create(&self, comment: NewComment) -> Result<Comment, DomainError>;

    /// Get a comment by id, only if it belongs to `post_id`
    async fn get(&self, post_id: PostId, id: CommentId) -> Result<Option<Comment>, DomainError>;

    /// Persist content changes of an existing comment
    async fn update(&self, comment: &Comment) -> Result<Comment, DomainError>;

    /// Delete a comment under `post_id`, returns true if it existed
    async fn delete(&self, post_id: PostId, id: CommentId) -> Result<bool, DomainError>;

    /// Comments of one post, newest first
    async fn list_for_post(&self, post_id: PostId) -> Result<Vec<Comment>, DomainError>;

    /// Remove every comment of a post, returns how many were removed
    async fn delete_for_post(&self, post_id: PostId) -> Result<usize, DomainError>;
}
