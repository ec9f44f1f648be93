//! Request identity
//!
//! A request is either anonymous or acts on behalf of a registered user
//! whose id was carried in a verified session token.

use crate::domain::user::{User, UserId};
use crate::domain::DomainError;

/// Who is acting on a request
#[derive(Debug, Clone, Default)]
pub enum Identity {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl Identity {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Anonymous => None,
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user().map(User::id)
    }

    /// The acting user, or `Unauthenticated` for anonymous requests
    pub fn require_user(&self) -> Result<&User, DomainError> {
        self.user().ok_or(DomainError::Unauthenticated)
    }
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        Self::Authenticated(user)
    }
}
