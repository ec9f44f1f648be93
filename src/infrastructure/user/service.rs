//! User service for registration and login

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::user::{
    validate_email, validate_password, validate_password_confirmation, validate_username,
    NewUser, User, UserId, UserRepository,
};
use crate::domain::DomainError;
use crate::infrastructure::auth::PasswordHasher;

/// Request for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
    pub verify_password: String,
    pub email: Option<String>,
}

/// User service for registration and authentication
#[derive(Debug)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new user
    pub async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError> {
        validate_username(&request.username).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password_confirmation(&request.password, &request.verify_password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let email = request.email.filter(|e| !e.trim().is_empty());

        if let Some(email) = &email {
            validate_email(email).map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if self.repository.username_exists(&request.username).await? {
            return Err(DomainError::username_taken(request.username));
        }

        let password_digest = self.hasher.hash(&request.username, &request.password)?;

        let user = self
            .repository
            .create(NewUser {
                username: request.username,
                password_digest,
                email,
            })
            .await?;

        info!(user_id = %user.id(), username = %user.username(), "User registered");

        Ok(user)
    }

    /// Check credentials, returning the user or `InvalidCredentials`
    pub async fn login(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let Some(user) = self.repository.get_by_username(username).await? else {
            debug!(username = %username, "Login for unknown username");
            return Err(DomainError::InvalidCredentials);
        };

        let valid = self
            .hasher
            .verify(username, password, user.password_digest())
            .inspect_err(|e| {
                error!(user_id = %user.id(), error = %e, "Stored password digest is corrupt");
            })?;

        if !valid {
            debug!(user_id = %user.id(), "Login with wrong password");
            return Err(DomainError::InvalidCredentials);
        }

        let user = self.upgrade_digest(user, password).await;

        info!(user_id = %user.id(), "User logged in");

        Ok(user)
    }

    /// Re-hash a record stored under an older scheme. Failure keeps the old record.
    async fn upgrade_digest(&self, mut user: User, password: &str) -> User {
        if !self.hasher.needs_rehash(user.password_digest()) {
            return user;
        }

        let digest = match self.hasher.hash(user.username(), password) {
            Ok(digest) => digest,
            Err(e) => {
                warn!(user_id = %user.id(), error = %e, "Password rehash failed");
                return user;
            }
        };

        let previous = user.clone();
        user.set_password_digest(digest);

        match self.repository.update(&user).await {
            Ok(updated) => {
                info!(user_id = %updated.id(), "Password digest upgraded");
                updated
            }
            Err(e) => {
                warn!(user_id = %user.id(), error = %e, "Failed to store upgraded password digest");
                previous
            }
        }
    }

    /// Get a user by ID
    pub async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.repository.get(id).await
    }

    /// Count registered users
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}
