//! API request, response and error types

pub mod blog;
pub mod error;
pub mod json;
pub mod path;

pub use blog::{
    CommentRequest, CommentView, CommentsResponse, LikesResponse, LoginRequest, PostDetailResponse,
    PostRequest, PostView, PostsResponse, SessionView, SignupRequest, UserView,
};
pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
pub use path::Path;
