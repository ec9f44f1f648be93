//! Comment endpoints, always scoped to their parent post

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use super::posts::AuthorNames;
use crate::api::middleware::CurrentIdentity;
use crate::api::state::AppState;
use crate::api::types::{
    ApiError, CommentRequest, CommentView, CommentsResponse, Json, Path,
};
use crate::domain::{CommentId, PostId};

/// GET /blog/{post_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(post_id): Path<PostId>,
) -> Result<Json<CommentsResponse>, ApiError> {
    let comments = state.content_service.list_comments(post_id).await?;
    let mut authors = AuthorNames::default();
    let mut views = Vec::with_capacity(comments.len());

    for comment in &comments {
        let author = authors.name(&state, comment.owner()).await?;
        views.push(CommentView::new(comment, author, &identity));
    }

    Ok(Json(CommentsResponse { comments: views }))
}

/// POST /blog/{post_id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(post_id): Path<PostId>,
    Json(request): Json<CommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let comment = state
        .content_service
        .add_comment(post_id, &identity, &request.content)
        .await?;

    let author = identity.user().map(|user| user.username().to_string());

    Ok((
        StatusCode::CREATED,
        Json(CommentView::new(&comment, author, &identity)),
    ))
}

/// PUT /blog/{post_id}/comments/{comment_id}
pub async fn edit_comment(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path((post_id, comment_id)): Path<(PostId, CommentId)>,
    Json(request): Json<CommentRequest>,
) -> Result<Json<CommentView>, ApiError> {
    let comment = state
        .content_service
        .edit_comment(post_id, comment_id, &identity, &request.content)
        .await?;

    let author = identity.user().map(|user| user.username().to_string());

    Ok(Json(CommentView::new(&comment, author, &identity)))
}

/// DELETE /blog/{post_id}/comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path((post_id, comment_id)): Path<(PostId, CommentId)>,
) -> Result<StatusCode, ApiError> {
    state
        .content_service
        .delete_comment(post_id, comment_id, &identity)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
