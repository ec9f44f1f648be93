//! Post repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{NewPost, Post, PostId};
use crate::domain::user::UserId;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for post persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PostRepository: Send + Sync + Debug {
    /// Create a post, assigning its id
    async fn create(&self, post: NewPost) -> Result<Post, DomainError>;

    /// Get a post by id
    async fn get(&self, id: PostId) -> Result<Option<Post>, DomainError>;

    /// Persist title/content changes of an existing post
    async fn update(&self, post: &Post) -> Result<Post, DomainError>;

    /// Delete a post, returns true if it existed
    async fn delete(&self, id: PostId) -> Result<bool, DomainError>;

    /// All posts, newest first
    async fn list_newest_first(&self) -> Result<Vec<Post>, DomainError>;

    /// Add `user` to the post's like-set as one atomic read-modify-write.
    ///
    /// Returns the like count after the operation, or `None` if the post
    /// does not exist. Repeating the call for the same user is a no-op.
    async fn add_like(&self, id: PostId, user: UserId) -> Result<Option<usize>, DomainError>;
}
