//! Content service - posts, comments and likes behind the ownership gate

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::comment::{Comment, CommentId, CommentRepository, NewComment};
use crate::domain::post::{validate_comment, validate_post, NewPost, Post, PostId, PostRepository};
use crate::domain::{ensure_can_mutate, DomainError, Identity};

/// Post and comment operations on behalf of a request identity
#[derive(Debug)]
pub struct ContentService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl ContentService {
    pub fn new(posts: Arc<dyn PostRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { posts, comments }
    }

    /// Create a post owned by the acting user. The like-set starts empty.
    pub async fn create_post(
        &self,
        identity: &Identity,
        title: &str,
        content: &str,
    ) -> Result<Post, DomainError> {
        let owner = identity.require_user()?.id();
        validate_post(title, content).map_err(|e| DomainError::validation(e.to_string()))?;

        let post = self
            .posts
            .create(NewPost {
                owner,
                title: title.to_string(),
                content: content.to_string(),
            })
            .await?;

        info!(post_id = %post.id(), owner = %owner, "Post created");

        Ok(post)
    }

    pub async fn get_post(&self, id: PostId) -> Result<Post, DomainError> {
        self.posts
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Post '{}' not found", id)))
    }

    /// All posts, newest first
    pub async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.posts.list_newest_first().await
    }

    /// Like a post as the acting user, returning the like count.
    ///
    /// Liking twice is a no-op. Anonymous callers are refused.
    pub async fn add_like(&self, id: PostId, identity: &Identity) -> Result<usize, DomainError> {
        let user = identity.require_user()?.id();

        let count = self
            .posts
            .add_like(id, user)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Post '{}' not found", id)))?;

        info!(post_id = %id, user_id = %user, likes = count, "Post liked");

        Ok(count)
    }

    pub async fn edit_post(
        &self,
        id: PostId,
        identity: &Identity,
        title: &str,
        content: &str,
    ) -> Result<Post, DomainError> {
        let mut post = self.get_post(id).await?;

        ensure_can_mutate(identity, post.owner(), "post").inspect_err(|e| {
            warn!(post_id = %id, user_id = ?identity.user_id(), error = %e, "Post edit refused");
        })?;
        validate_post(title, content).map_err(|e| DomainError::validation(e.to_string()))?;

        post.edit(title, content);
        let post = self.posts.update(&post).await?;

        info!(post_id = %id, "Post edited");

        Ok(post)
    }

    /// Delete a post together with its comments
    pub async fn delete_post(&self, id: PostId, identity: &Identity) -> Result<(), DomainError> {
        let post = self.get_post(id).await?;

        ensure_can_mutate(identity, post.owner(), "post").inspect_err(|e| {
            warn!(post_id = %id, user_id = ?identity.user_id(), error = %e, "Post delete refused");
        })?;

        if !self.posts.delete(id).await? {
            return Err(DomainError::not_found(format!("Post '{}' not found", id)));
        }

        let removed = self.comments.delete_for_post(id).await?;

        info!(post_id = %id, comments_removed = removed, "Post deleted");

        Ok(())
    }

    /// Comment on an existing post as the acting user
    pub async fn add_comment(
        &self,
        post_id: PostId,
        identity: &Identity,
        content: &str,
    ) -> Result<Comment, DomainError> {
        let owner = identity.require_user()?.id();
        validate_comment(content).map_err(|e| DomainError::validation(e.to_string()))?;

        self.get_post(post_id).await?;

        let comment = self
            .comments
            .create(NewComment {
                post_id,
                owner,
                content: content.to_string(),
            })
            .await?;

        // A delete_post between the check and the insert leaves the comment unreachable
        if self.posts.get(post_id).await?.is_none() {
            self.comments.delete_for_post(post_id).await?;
            warn!(post_id = %post_id, comment_id = %comment.id(), "Post deleted while commenting");
            return Err(DomainError::not_found(format!("Post '{}' not found", post_id)));
        }

        info!(post_id = %post_id, comment_id = %comment.id(), "Comment added");

        Ok(comment)
    }

    pub async fn get_comment(
        &self,
        post_id: PostId,
        id: CommentId,
    ) -> Result<Comment, DomainError> {
        self.comments.get(post_id, id).await?.ok_or_else(|| {
            DomainError::not_found(format!("Comment '{}' not found on post '{}'", id, post_id))
        })
    }

    /// Comments of an existing post, newest first
    pub async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, DomainError> {
        self.get_post(post_id).await?;
        self.comments.list_for_post(post_id).await
    }

    /// Edit a comment. Only its own author may, whoever owns the post.
    pub async fn edit_comment(
        &self,
        post_id: PostId,
        id: CommentId,
        identity: &Identity,
        content: &str,
    ) -> Result<Comment, DomainError> {
        let mut comment = self.get_comment(post_id, id).await?;

        ensure_can_mutate(identity, comment.owner(), "comment").inspect_err(|e| {
            warn!(comment_id = %id, user_id = ?identity.user_id(), error = %e, "Comment edit refused");
        })?;
        validate_comment(content).map_err(|e| DomainError::validation(e.to_string()))?;

        comment.set_content(content);
        self.comments.update(&comment).await
    }

    pub async fn delete_comment(
        &self,
        post_id: PostId,
        id: CommentId,
        identity: &Identity,
    ) -> Result<(), DomainError> {
        let comment = self.get_comment(post_id, id).await?;

        ensure_can_mutate(identity, comment.owner(), "comment").inspect_err(|e| {
            warn!(comment_id = %id, user_id = ?identity.user_id(), error = %e, "Comment delete refused");
        })?;

        if !self.comments.delete(post_id, id).await? {
            return Err(DomainError::not_found(format!("Comment '{}' not found", id)));
        }

        info!(post_id = %post_id, comment_id = %id, "Comment deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::comment::MockCommentRepository;
    use crate::domain::post::MockPostRepository;
    use crate::domain::user::{NewUser, User, UserId};
    use crate::infrastructure::comment::InMemoryCommentRepository;
    use crate::infrastructure::post::InMemoryPostRepository;

    fn create_service() -> ContentService {
        ContentService::new(
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(InMemoryCommentRepository::new()),
        )
    }

    fn user(id: i64, username: &str) -> Identity {
        Identity::from(User::from_new(
            UserId::new(id),
            NewUser {
                username: username.to_string(),
                password_digest: "digest,salts".to_string(),
                email: None,
            },
        ))
    }

    fn alice() -> Identity {
        user(1, "alice")
    }

    fn bob() -> Identity {
        user(2, "bob")
    }

    #[tokio::test]
    async fn test_create_post() {
        let service = create_service();

        let post = service.create_post(&alice(), "Hello", "World").await.unwrap();

        assert_eq!(post.owner(), UserId::new(1));
        assert_eq!(post.like_count(), 0);
        assert_eq!(service.get_post(post.id()).await.unwrap().title(), "Hello");
    }

    #[tokio::test]
    async fn test_create_post_requires_login() {
        let service = create_service();

        let result = service.create_post(&Identity::Anonymous, "Hello", "World").await;
        assert!(matches!(result, Err(DomainError::Unauthenticated)));
        assert!(service.list_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_post_requires_title_and_content() {
        let service = create_service();

        let result = service.create_post(&alice(), "", "World").await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_get_missing_post() {
        let service = create_service();

        let result = service.get_post(PostId::new(42)).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_double_like_counts_once() {
        let service = create_service();
        let post = service.create_post(&alice(), "Hello", "World").await.unwrap();

        assert_eq!(service.add_like(post.id(), &bob()).await.unwrap(), 1);
        assert_eq!(service.add_like(post.id(), &bob()).await.unwrap(), 1);

        let post = service.get_post(post.id()).await.unwrap();
        assert_eq!(post.like_count(), 1);
        assert!(post.is_liked_by(UserId::new(2)));
    }

    #[tokio::test]
    async fn test_owner_may_like_own_post() {
        let service = create_service();
        let post = service.create_post(&alice(), "Hello", "World").await.unwrap();

        assert_eq!(service.add_like(post.id(), &alice()).await.unwrap(), 1);
        assert_eq!(service.add_like(post.id(), &bob()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_anonymous_like_is_refused() {
        let service = create_service();
        let post = service.create_post(&alice(), "Hello", "World").await.unwrap();

        let result = service.add_like(post.id(), &Identity::Anonymous).await;
        assert!(matches!(result, Err(DomainError::Unauthenticated)));
        assert_eq!(service.get_post(post.id()).await.unwrap().like_count(), 0);
    }

    #[tokio::test]
    async fn test_like_missing_post() {
        let service = create_service();

        let result = service.add_like(PostId::new(42), &bob()).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_owner_edits_post() {
        let service = create_service();
        let post = service.create_post(&alice(), "Hello", "World").await.unwrap();

        let edited = service
            .edit_post(post.id(), &alice(), "Hello again", "Still here")
            .await
            .unwrap();

        assert_eq!(edited.title(), "Hello again");
        assert_eq!(edited.content(), "Still here");
    }

    #[tokio::test]
    async fn test_other_user_cannot_edit_post() {
        let service = create_service();
        let post = service.create_post(&alice(), "Hello", "World").await.unwrap();

        let result = service.edit_post(post.id(), &bob(), "Mine now", "Gotcha").await;
        assert!(matches!(result, Err(DomainError::Forbidden { .. })));

        let unchanged = service.get_post(post.id()).await.unwrap();
        assert_eq!(unchanged.title(), "Hello");
        assert_eq!(unchanged.content(), "World");
    }

    #[tokio::test]
    async fn test_anonymous_cannot_edit_post() {
        let service = create_service();
        let post = service.create_post(&alice(), "Hello", "World").await.unwrap();

        let result = service
            .edit_post(post.id(), &Identity::Anonymous, "x", "y")
            .await;
        assert!(matches!(result, Err(DomainError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_other_user_cannot_delete_post() {
        let service = create_service();
        let post = service.create_post(&alice(), "Hello", "World").await.unwrap();

        let result = service.delete_post(post.id(), &bob()).await;
        assert!(matches!(result, Err(DomainError::Forbidden { .. })));

        let posts = service.list_posts().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id(), post.id());
    }

    #[tokio::test]
    async fn test_delete_post_removes_comments() {
        let service = create_service();
        let post = service.create_post(&alice(), "Hello", "World").await.unwrap();
        let comment = service.add_comment(post.id(), &bob(), "Nice").await.unwrap();

        service.delete_post(post.id(), &alice()).await.unwrap();

        assert!(matches!(
            service.get_post(post.id()).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.get_comment(post.id(), comment.id()).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_posts_newest_first() {
        let service = create_service();
        let first = service.create_post(&alice(), "First", "1").await.unwrap();
        let second = service.create_post(&bob(), "Second", "2").await.unwrap();

        let ids: Vec<PostId> = service
            .list_posts()
            .await
            .unwrap()
            .iter()
            .map(Post::id)
            .collect();

        assert_eq!(ids, vec![second.id(), first.id()]);
    }

    #[tokio::test]
    async fn test_add_comment() {
        let service = create_service();
        let post = service.create_post(&alice(), "Hello", "World").await.unwrap();

        let comment = service.add_comment(post.id(), &bob(), "Nice").await.unwrap();

        assert_eq!(comment.post_id(), post.id());
        assert_eq!(comment.owner(), UserId::new(2));
    }

    #[tokio::test]
    async fn test_comment_racing_post_delete_is_removed() {
        let owner = UserId::new(1);
        let mut lookups = 0;
        let mut posts = MockPostRepository::new();
        posts.expect_get().times(2).returning(move |id| {
            lookups += 1;
            if lookups > 1 {
                return Ok(None);
            }
            Ok(Some(Post::from_new(
                id,
                NewPost {
                    owner,
                    title: "Hello".to_string(),
                    content: "World".to_string(),
                },
            )))
        });

        let comments = Arc::new(InMemoryCommentRepository::new());
        let service = ContentService::new(Arc::new(posts), comments.clone());

        let result = service.add_comment(PostId::new(1), &bob(), "Nice").await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert!(comments.list_for_post(PostId::new(1)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_anonymous_cannot_comment() {
        let service = create_service();
        let post = service.create_post(&alice(), "Hello", "World").await.unwrap();

        let result = service
            .add_comment(post.id(), &Identity::Anonymous, "Nice")
            .await;
        assert!(matches!(result, Err(DomainError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_comment_on_missing_post() {
        let service = create_service();

        let result = service.add_comment(PostId::new(42), &bob(), "Hello?").await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_empty_comment_rejected() {
        let service = create_service();
        let post = service.create_post(&alice(), "Hello", "World").await.unwrap();

        let result = service.add_comment(post.id(), &bob(), "  ").await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_comments_are_scoped_to_their_post() {
        let service = create_service();
        let first = service.create_post(&alice(), "First", "1").await.unwrap();
        let second = service.create_post(&alice(), "Second", "2").await.unwrap();

        let a = service.add_comment(first.id(), &bob(), "on first").await.unwrap();
        service.add_comment(second.id(), &bob(), "on second").await.unwrap();
        let b = service.add_comment(first.id(), &alice(), "first again").await.unwrap();

        let comments = service.list_comments(first.id()).await.unwrap();
        let ids: Vec<CommentId> = comments.iter().map(Comment::id).collect();

        assert_eq!(ids, vec![b.id(), a.id()]);
        assert!(comments.iter().all(|c| c.post_id() == first.id()));

        assert!(matches!(
            service.get_comment(second.id(), a.id()).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_comment_ownership_is_independent_of_post_owner() {
        let service = create_service();
        let post = service.create_post(&alice(), "Hello", "World").await.unwrap();
        let comment = service.add_comment(post.id(), &bob(), "Nice").await.unwrap();

        let result = service
            .edit_comment(post.id(), comment.id(), &alice(), "Edited by alice")
            .await;
        assert!(matches!(result, Err(DomainError::Forbidden { .. })));

        let result = service.delete_comment(post.id(), comment.id(), &alice()).await;
        assert!(matches!(result, Err(DomainError::Forbidden { .. })));

        let edited = service
            .edit_comment(post.id(), comment.id(), &bob(), "Very nice")
            .await
            .unwrap();
        assert_eq!(edited.content(), "Very nice");

        service
            .delete_comment(post.id(), comment.id(), &bob())
            .await
            .unwrap();
        assert!(service.list_comments(post.id()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_comments_for_missing_post() {
        let service = create_service();

        let result = service.list_comments(PostId::new(42)).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let mut posts = MockPostRepository::new();
        posts
            .expect_list_newest_first()
            .returning(|| Err(DomainError::storage("connection refused")));

        let service = ContentService::new(Arc::new(posts), Arc::new(MockCommentRepository::new()));

        let result = service.list_posts().await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_refused_delete_touches_no_storage() {
        let owner = UserId::new(1);
        let mut posts = MockPostRepository::new();
        posts.expect_get().returning(move |id| {
            Ok(Some(Post::from_new(
                id,
                NewPost {
                    owner,
                    title: "Hello".to_string(),
                    content: "World".to_string(),
                },
            )))
        });
        posts.expect_delete().never();

        let mut comments = MockCommentRepository::new();
        comments.expect_delete_for_post().never();

        let service = ContentService::new(Arc::new(posts), Arc::new(comments));

        let result = service.delete_post(PostId::new(7), &bob()).await;
        assert!(matches!(result, Err(DomainError::Forbidden { .. })));
    }
}
