//! Request and response bodies of the blog API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Comment, CommentId, Identity, Post, PostId, User, UserId};

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub verify: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of post creation and edits
#[derive(Debug, Clone, Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserView {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_string(),
            email: user.email().map(str::to_string),
            created_at: user.created_at(),
        }
    }
}

/// Who the caller is according to their session cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserView>,
}

impl From<&Identity> for SessionView {
    fn from(identity: &Identity) -> Self {
        Self {
            authenticated: identity.is_authenticated(),
            user: identity.user().map(UserView::from),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostView {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub owner_id: UserId,
    /// Missing when the author record no longer resolves
    pub author: Option<String>,
    pub likes: usize,
    pub liked_by_me: bool,
    pub can_edit: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostView {
    pub fn new(post: &Post, author: Option<String>, viewer: &Identity) -> Self {
        Self {
            id: post.id(),
            title: post.title().to_string(),
            content: post.content().to_string(),
            owner_id: post.owner(),
            author,
            likes: post.like_count(),
            liked_by_me: viewer.user_id().is_some_and(|id| post.is_liked_by(id)),
            can_edit: crate::domain::can_mutate(viewer, post.owner()),
            created_at: post.created_at(),
            updated_at: post.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    pub id: CommentId,
    pub post_id: PostId,
    pub owner_id: UserId,
    pub author: Option<String>,
    pub content: String,
    pub can_edit: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommentView {
    pub fn new(comment: &Comment, author: Option<String>, viewer: &Identity) -> Self {
        Self {
            id: comment.id(),
            post_id: comment.post_id(),
            owner_id: comment.owner(),
            author,
            content: comment.content().to_string(),
            can_edit: crate::domain::can_mutate(viewer, comment.owner()),
            created_at: comment.created_at(),
            updated_at: comment.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsResponse {
    pub posts: Vec<PostView>,
}

/// A post with its comments, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub post: PostView,
    pub comments: Vec<CommentView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentsResponse {
    pub comments: Vec<CommentView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikesResponse {
    pub likes: usize,
}
