//! In-memory comment repository implementation

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::domain::comment::{Comment, CommentId, CommentRepository, NewComment};
use crate::domain::post::PostId;
use crate::domain::DomainError;

/// In-memory implementation of CommentRepository
#[derive(Debug)]
pub struct InMemoryCommentRepository {
    comments: RwLock<HashMap<CommentId, Comment>>,
    next_id: AtomicI64,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self {
            comments: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryCommentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create(&self, new_comment: NewComment) -> Result<Comment, DomainError> {
        let id = CommentId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let comment = Comment::from_new(id, new_comment);

        self.comments.write().await.insert(id, comment.clone());
        Ok(comment)
    }

    async fn get(&self, post_id: PostId, id: CommentId) -> Result<Option<Comment>, DomainError> {
        let comments = self.comments.read().await;

        Ok(comments
            .get(&id)
            .filter(|c| c.post_id() == post_id)
            .cloned())
    }

    async fn update(&self, comment: &Comment) -> Result<Comment, DomainError> {
        let mut comments = self.comments.write().await;

        match comments.get_mut(&comment.id()) {
            Some(stored) if stored.post_id() == comment.post_id() => {
                *stored = comment.clone();
                Ok(comment.clone())
            }
            _ => Err(DomainError::not_found(format!(
                "Comment '{}' not found",
                comment.id()
            ))),
        }
    }

    async fn delete(&self, post_id: PostId, id: CommentId) -> Result<bool, DomainError> {
        let mut comments = self.comments.write().await;

        if comments.get(&id).is_some_and(|c| c.post_id() == post_id) {
            comments.remove(&id);
            return Ok(true);
        }

        Ok(false)
    }

    async fn list_for_post(&self, post_id: PostId) -> Result<Vec<Comment>, DomainError> {
        let mut comments: Vec<Comment> = self
            .comments
            .read()
            .await
            .values()
            .filter(|c| c.post_id() == post_id)
            .cloned()
            .collect();

        comments.sort_by_key(|c| Reverse((c.created_at(), c.id())));
        Ok(comments)
    }

    async fn delete_for_post(&self, post_id: PostId) -> Result<usize, DomainError> {
        let mut comments = self.comments.write().await;
        let before = comments.len();

        comments.retain(|_, c| c.post_id() != post_id);
        Ok(before - comments.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;

    fn new_comment(post_id: i64, content: &str) -> NewComment {
        NewComment {
            post_id: PostId::new(post_id),
            owner: UserId::new(1),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_is_scoped_to_post() {
        let repo = InMemoryCommentRepository::new();
        let comment = repo.create(new_comment(1, "Hello")).await.unwrap();

        assert!(repo.get(PostId::new(1), comment.id()).await.unwrap().is_some());
        assert!(repo.get(PostId::new(2), comment.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_for_post_newest_first() {
        let repo = InMemoryCommentRepository::new();

        let first = repo.create(new_comment(1, "First")).await.unwrap();
        repo.create(new_comment(2, "Elsewhere")).await.unwrap();
        let second = repo.create(new_comment(1, "Second")).await.unwrap();

        let ids: Vec<CommentId> = repo
            .list_for_post(PostId::new(1))
            .await
            .unwrap()
            .iter()
            .map(Comment::id)
            .collect();

        assert_eq!(ids, vec![second.id(), first.id()]);
    }

    #[tokio::test]
    async fn test_update() {
        let repo = InMemoryCommentRepository::new();
        let mut comment = repo.create(new_comment(1, "Hello")).await.unwrap();

        comment.set_content("Edited");
        repo.update(&comment).await.unwrap();

        let stored = repo.get(PostId::new(1), comment.id()).await.unwrap().unwrap();
        assert_eq!(stored.content(), "Edited");
    }

    #[tokio::test]
    async fn test_delete_wrong_post_keeps_comment() {
        let repo = InMemoryCommentRepository::new();
        let comment = repo.create(new_comment(1, "Hello")).await.unwrap();

        assert!(!repo.delete(PostId::new(2), comment.id()).await.unwrap());
        assert!(repo.delete(PostId::new(1), comment.id()).await.unwrap());
        assert!(repo.get(PostId::new(1), comment.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_for_post() {
        let repo = InMemoryCommentRepository::new();
        repo.create(new_comment(1, "a")).await.unwrap();
        repo.create(new_comment(1, "b")).await.unwrap();
        repo.create(new_comment(2, "c")).await.unwrap();

        assert_eq!(repo.delete_for_post(PostId::new(1)).await.unwrap(), 2);
        assert!(repo.list_for_post(PostId::new(1)).await.unwrap().is_empty());
        assert_eq!(repo.list_for_post(PostId::new(2)).await.unwrap().len(), 1);
    }
}
