//! Session cookie extraction

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::api::state::AppState;
use crate::domain::session::Identity;
use crate::infrastructure::auth::SessionToken;

/// Identity of the caller, resolved from the session cookie.
///
/// Missing, tampered or stale cookies yield `Identity::Anonymous`; this
/// extractor never rejects a request.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl FromRequestParts<AppState> for CurrentIdentity {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let sessions = &state.session_manager;
        let token = session_cookie(&parts.headers, sessions.cookie_name());

        Ok(CurrentIdentity(sessions.resolve(token.as_deref()).await))
    }
}

/// Read the raw session cookie value
pub fn session_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|cookie| cookie.value().to_string())
}

/// `Set-Cookie` value carrying `token`, scoped to the whole site
pub fn session_set_cookie(cookie_name: &str, token: &SessionToken) -> String {
    Cookie::build((cookie_name.to_string(), token.to_string()))
        .path("/")
        .build()
        .to_string()
}
