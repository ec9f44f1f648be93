//! Blog API endpoints
//!
//! Mounted under `/blog`. Reads are open to everyone; mutations need a
//! session and, for edits and deletes, ownership of the resource.

mod comments;
mod posts;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::api::auth;
use crate::api::state::AppState;

/// Create the blog router, account endpoints included
pub fn create_blog_router() -> Router<AppState> {
    Router::new()
        .merge(auth::create_auth_router())
        .route("/", get(posts::list_posts))
        .route("/newpost", post(posts::create_post))
        .route(
            "/{post_id}",
            get(posts::get_post)
                .put(posts::edit_post)
                .delete(posts::delete_post),
        )
        .route("/{post_id}/like", post(posts::like_post))
        .route(
            "/{post_id}/comments",
            get(comments::list_comments).post(comments::add_comment),
        )
        .route(
            "/{post_id}/comments/{comment_id}",
            put(comments::edit_comment).delete(comments::delete_comment),
        )
}
