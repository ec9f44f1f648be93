//! Ownership gate for post and comment mutation

use crate::domain::session::Identity;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// True only when `identity` is authenticated as the resource owner
pub fn can_mutate(identity: &Identity, resource_owner: UserId) -> bool {
    identity.user_id() == Some(resource_owner)
}

/// Check the ownership gate, distinguishing anonymous callers from
/// authenticated non-owners.
pub fn ensure_can_mutate(
    identity: &Identity,
    resource_owner: UserId,
    resource: &str,
) -> Result<(), DomainError> {
    if !identity.is_authenticated() {
        return Err(DomainError::Unauthenticated);
    }

    if !can_mutate(identity, resource_owner) {
        return Err(DomainError::forbidden(format!(
            "Only the author may modify this {}",
            resource
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{NewUser, User};

    fn identity(id: i64) -> Identity {
        Identity::from(User::from_new(
            UserId::new(id),
            NewUser {
                username: "someone".to_string(),
                password_digest: "d,s".to_string(),
                email: None,
            },
        ))
    }

    #[test]
    fn test_owner_can_mutate() {
        assert!(can_mutate(&identity(1), UserId::new(1)));
        assert!(ensure_can_mutate(&identity(1), UserId::new(1), "post").is_ok());
    }

    #[test]
    fn test_other_user_cannot_mutate() {
        assert!(!can_mutate(&identity(2), UserId::new(1)));
        assert!(matches!(
            ensure_can_mutate(&identity(2), UserId::new(1), "comment"),
            Err(DomainError::Forbidden { .. })
        ));
    }

    #[test]
    fn test_anonymous_never_mutates() {
        assert!(!can_mutate(&Identity::Anonymous, UserId::new(1)));
        assert!(matches!(
            ensure_can_mutate(&Identity::Anonymous, UserId::new(1), "post"),
            Err(DomainError::Unauthenticated)
        ));
    }
}
