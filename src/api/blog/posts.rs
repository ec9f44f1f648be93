//! Post endpoints

use std::collections::HashMap;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;

use crate::api::middleware::CurrentIdentity;
use crate::api::state::AppState;
use crate::api::types::{
    ApiError, CommentView, Json, LikesResponse, Path, PostDetailResponse, PostRequest, PostView,
    PostsResponse,
};
use crate::domain::{PostId, UserId};

/// Resolves owner ids to usernames, once per id
#[derive(Default)]
pub(super) struct AuthorNames(HashMap<UserId, Option<String>>);

impl AuthorNames {
    pub(super) async fn name(
        &mut self,
        state: &AppState,
        id: UserId,
    ) -> Result<Option<String>, ApiError> {
        if let Some(name) = self.0.get(&id) {
            return Ok(name.clone());
        }

        let name = state
            .user_service
            .get(id)
            .await?
            .map(|user| user.username().to_string());

        self.0.insert(id, name.clone());
        Ok(name)
    }
}

/// List all posts, newest first
///
/// GET /blog
pub async fn list_posts(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Json<PostsResponse>, ApiError> {
    let posts = state.content_service.list_posts().await?;
    let mut authors = AuthorNames::default();
    let mut views = Vec::with_capacity(posts.len());

    for post in &posts {
        let author = authors.name(&state, post.owner()).await?;
        views.push(PostView::new(post, author, &identity));
    }

    debug!(count = views.len(), "Listed posts");

    Ok(Json(PostsResponse { posts: views }))
}

/// Create a post owned by the caller
///
/// POST /blog/newpost
pub async fn create_post(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Json(request): Json<PostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state
        .content_service
        .create_post(&identity, &request.title, &request.content)
        .await?;

    let author = identity.user().map(|user| user.username().to_string());

    Ok((StatusCode::CREATED, Json(PostView::new(&post, author, &identity))))
}

/// A post with its comments
///
/// GET /blog/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(post_id): Path<PostId>,
) -> Result<Json<PostDetailResponse>, ApiError> {
    let post = state.content_service.get_post(post_id).await?;
    let comments = state.content_service.list_comments(post_id).await?;

    let mut authors = AuthorNames::default();
    let author = authors.name(&state, post.owner()).await?;

    let mut comment_views = Vec::with_capacity(comments.len());
    for comment in &comments {
        let author = authors.name(&state, comment.owner()).await?;
        comment_views.push(CommentView::new(comment, author, &identity));
    }

    Ok(Json(PostDetailResponse {
        post: PostView::new(&post, author, &identity),
        comments: comment_views,
    }))
}

/// Replace title and content of the caller's own post
///
/// PUT /blog/{post_id}
pub async fn edit_post(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(post_id): Path<PostId>,
    Json(request): Json<PostRequest>,
) -> Result<Json<PostView>, ApiError> {
    let post = state
        .content_service
        .edit_post(post_id, &identity, &request.title, &request.content)
        .await?;

    let author = identity.user().map(|user| user.username().to_string());

    Ok(Json(PostView::new(&post, author, &identity)))
}

/// Delete the caller's own post and its comments
///
/// DELETE /blog/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(post_id): Path<PostId>,
) -> Result<StatusCode, ApiError> {
    state.content_service.delete_post(post_id, &identity).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Like a post. Repeated likes by the same user count once.
///
/// POST /blog/{post_id}/like
pub async fn like_post(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(post_id): Path<PostId>,
) -> Result<Json<LikesResponse>, ApiError> {
    let likes = state.content_service.add_like(post_id, &identity).await?;
    Ok(Json(LikesResponse { likes }))
}
