//! Account endpoints
//!
//! Signup, login and logout set or clear the signed session cookie.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use crate::api::middleware::{session_set_cookie, CurrentIdentity};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, LoginRequest, SessionView, SignupRequest, UserView};
use crate::infrastructure::auth::SessionToken;
use crate::infrastructure::user::RegisterUserRequest;

/// Create the account router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", get(logout).post(logout))
        .route("/me", get(current_session))
}

fn set_cookie(state: &AppState, token: &SessionToken) -> [(header::HeaderName, String); 1] {
    let cookie_name = state.session_manager.cookie_name();
    [(header::SET_COOKIE, session_set_cookie(cookie_name, token))]
}

/// Register a new account and log it in
///
/// POST /blog/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .user_service
        .register(RegisterUserRequest {
            username: request.username,
            password: request.password,
            verify_password: request.verify,
            email: request.email,
        })
        .await?;

    let token = state.session_manager.login(&user);

    Ok((
        StatusCode::CREATED,
        set_cookie(&state, &token),
        Json(UserView::from(&user)),
    ))
}

/// Login with username and password
///
/// POST /blog/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .user_service
        .login(&request.username, &request.password)
        .await?;

    let token = state.session_manager.login(&user);

    Ok((set_cookie(&state, &token), Json(UserView::from(&user))))
}

/// Clear the session cookie
///
/// GET|POST /blog/logout
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let token = state.session_manager.logout();

    (
        set_cookie(&state, &token),
        Json(SessionView {
            authenticated: false,
            user: None,
        }),
    )
}

/// Who the session cookie belongs to
///
/// GET /blog/me
pub async fn current_session(CurrentIdentity(identity): CurrentIdentity) -> Json<SessionView> {
    Json(SessionView::from(&identity))
}
