//! In-memory post repository implementation

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::domain::post::{NewPost, Post, PostId, PostRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Thread-safe in-memory post storage
///
/// Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<PostId, Post>>,
    next_id: AtomicI64,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, DomainError> {
        let id = PostId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let post = Post::from_new(id, new_post);

        self.posts.write().await.insert(id, post.clone());
        Ok(post)
    }

    async fn get(&self, id: PostId) -> Result<Option<Post>, DomainError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn update(&self, post: &Post) -> Result<Post, DomainError> {
        let mut posts = self.posts.write().await;

        let Some(stored) = posts.get_mut(&post.id()) else {
            return Err(DomainError::not_found(format!("Post '{}' not found", post.id())));
        };

        // Likes recorded since `post` was read must survive an edit
        stored.edit(post.title(), post.content());
        Ok(stored.clone())
    }

    async fn delete(&self, id: PostId) -> Result<bool, DomainError> {
        Ok(self.posts.write().await.remove(&id).is_some())
    }

    async fn list_newest_first(&self) -> Result<Vec<Post>, DomainError> {
        let mut posts: Vec<Post> = self.posts.read().await.values().cloned().collect();
        posts.sort_by_key(|p| Reverse((p.created_at(), p.id())));
        Ok(posts)
    }

    async fn add_like(&self, id: PostId, user: UserId) -> Result<Option<usize>, DomainError> {
        // The write lock spans the read-modify-write so concurrent likes are not lost
        let mut posts = self.posts.write().await;

        Ok(posts.get_mut(&id).map(|post| {
            post.add_like(user);
            post.like_count()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_post(owner: i64, title: &str) -> NewPost {
        NewPost {
            owner: UserId::new(owner),
            title: title.to_string(),
            content: "content".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(new_post(1, "First")).await.unwrap();

        let retrieved = repo.get(post.id()).await.unwrap().unwrap();
        assert_eq!(retrieved.title(), "First");
        assert_eq!(retrieved.like_count(), 0);
        assert!(repo.get(PostId::new(999)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = InMemoryPostRepository::new();

        let first = repo.create(new_post(1, "First")).await.unwrap();
        let second = repo.create(new_post(1, "Second")).await.unwrap();
        let third = repo.create(new_post(2, "Third")).await.unwrap();

        let ids: Vec<PostId> = repo
            .list_newest_first()
            .await
            .unwrap()
            .iter()
            .map(Post::id)
            .collect();

        assert_eq!(ids, vec![third.id(), second.id(), first.id()]);
    }

    #[tokio::test]
    async fn test_update_keeps_likes() {
        let repo = InMemoryPostRepository::new();
        let mut stale = repo.create(new_post(1, "First")).await.unwrap();

        repo.add_like(stale.id(), UserId::new(2)).await.unwrap();

        stale.edit("Edited", "New content");
        let updated = repo.update(&stale).await.unwrap();

        assert_eq!(updated.title(), "Edited");
        assert_eq!(updated.like_count(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_post() {
        let repo = InMemoryPostRepository::new();
        let other = InMemoryPostRepository::new();
        let post = other.create(new_post(1, "Elsewhere")).await.unwrap();

        let result = repo.update(&post).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(new_post(1, "First")).await.unwrap();

        assert!(repo.delete(post.id()).await.unwrap());
        assert!(!repo.delete(post.id()).await.unwrap());
        assert!(repo.get(post.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_like_idempotent() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(new_post(1, "First")).await.unwrap();

        assert_eq!(repo.add_like(post.id(), UserId::new(2)).await.unwrap(), Some(1));
        assert_eq!(repo.add_like(post.id(), UserId::new(2)).await.unwrap(), Some(1));
        assert_eq!(repo.add_like(post.id(), UserId::new(3)).await.unwrap(), Some(2));
        assert_eq!(repo.add_like(PostId::new(999), UserId::new(2)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_concurrent_likes_are_not_lost() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let post = repo.create(new_post(1, "Popular")).await.unwrap();

        let handles: Vec<_> = (100..150)
            .map(|user| {
                let repo = repo.clone();
                let id = post.id();
                tokio::spawn(async move { repo.add_like(id, UserId::new(user)).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let post = repo.get(post.id()).await.unwrap().unwrap();
        assert_eq!(post.like_count(), 50);
    }
}
