//! Cookie sessions
//!
//! All session state lives in the signed cookie value: the payload is the
//! decimal user id. Rotating the secret invalidates every outstanding session.

use std::fmt::Debug;
use std::sync::Arc;

use tracing::{debug, warn};

use super::signed_token::TokenSigner;
use crate::domain::session::Identity;
use crate::domain::user::{User, UserId, UserRepository};

/// Value to store in the client's session cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty token tells the client to drop its session
    pub fn is_cleared(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues session tokens and resolves them back to identities
pub struct SessionManager {
    signer: TokenSigner,
    users: Arc<dyn UserRepository>,
    cookie_name: String,
}

impl Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("signer", &self.signer)
            .field("cookie_name", &self.cookie_name)
            .finish()
    }
}

impl SessionManager {
    pub fn new(
        signer: TokenSigner,
        users: Arc<dyn UserRepository>,
        cookie_name: impl Into<String>,
    ) -> Self {
        Self {
            signer,
            users,
            cookie_name: cookie_name.into(),
        }
    }

    /// Name of the cookie carrying the session token
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Resolve an inbound token. Every failure resolves to `Anonymous`.
    pub async fn resolve(&self, token: Option<&str>) -> Identity {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Identity::Anonymous;
        };

        let payload = match self.signer.verify(token) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(reason = %e, "Rejected session token");
                return Identity::Anonymous;
            }
        };

        let Some(user_id) = UserId::parse(payload) else {
            warn!("Session token payload is not a user id");
            return Identity::Anonymous;
        };

        match self.users.get(user_id).await {
            Ok(Some(user)) => {
                debug!(user_id = %user_id, "Session resolved");
                Identity::Authenticated(user)
            }
            Ok(None) => {
                debug!(user_id = %user_id, "Session user no longer exists");
                Identity::Anonymous
            }
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Failed to load session user");
                Identity::Anonymous
            }
        }
    }

    /// Token establishing a session for `user`
    pub fn login(&self, user: &User) -> SessionToken {
        SessionToken(self.signer.sign(&user.id().to_string()))
    }

    /// Token clearing the client's session
    pub fn logout(&self) -> SessionToken {
        SessionToken(String::new())
    }
}
