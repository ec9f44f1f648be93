use serde::Deserialize;

use crate::infrastructure::auth::PasswordScheme;
use crate::infrastructure::storage::{PostgresConfig, StorageConfig, StorageType};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub session: SessionConfig,
    pub storage: StorageSettings,
    pub password: PasswordConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Session cookie settings
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// HMAC key for session cookies. Must be set.
    pub secret: String,
    pub cookie_name: String,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"[REDACTED]")
            .field("cookie_name", &self.cookie_name)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `memory` or `postgres`
    pub backend: String,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PasswordConfig {
    pub scheme: PasswordScheme,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            cookie_name: "username".to_string(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            database_url: None,
            max_connections: 10,
        }
    }
}

impl StorageSettings {
    /// Resolve the backend selection into a concrete storage configuration
    pub fn to_storage_config(&self) -> Result<StorageConfig, config::ConfigError> {
        let backend: StorageType = self
            .backend
            .parse()
            .map_err(|e: crate::domain::DomainError| config::ConfigError::Message(e.to_string()))?;

        match backend {
            StorageType::InMemory => Ok(StorageConfig::in_memory()),
            StorageType::Postgres => {
                let url = self
                    .database_url
                    .as_deref()
                    .filter(|url| !url.trim().is_empty())
                    .ok_or_else(|| {
                        config::ConfigError::Message(
                            "storage.database_url is required for the postgres backend".to_string(),
                        )
                    })?;

                Ok(StorageConfig::postgres(
                    PostgresConfig::new(url).with_max_connections(self.max_connections),
                ))
            }
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Reject configurations the server cannot safely start with
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.session.secret.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "session.secret must be set (e.g. APP__SESSION__SECRET)".to_string(),
            ));
        }

        if self.session.cookie_name.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "session.cookie_name must not be empty".to_string(),
            ));
        }

        self.storage.to_storage_config()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_secret() -> AppConfig {
        let mut config = AppConfig::default();
        config.session.secret = "imsosecret".to_string();
        config
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.session.cookie_name, "username");
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.password.scheme, PasswordScheme::LegacySha256);
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        assert!(AppConfig::default().validate().is_err());
        assert!(with_secret().validate().is_ok());
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let mut config = with_secret();
        config.storage.backend = "postgres".to_string();
        assert!(config.validate().is_err());

        config.storage.database_url = Some("postgres://localhost/blog".to_string());
        let storage = config.storage.to_storage_config().unwrap();
        assert_eq!(storage.storage_type(), StorageType::Postgres);
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let mut config = with_secret();
        config.storage.backend = "cassandra".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let output = format!("{:?}", with_secret().session);
        assert!(!output.contains("imsosecret"));
    }

    #[test]
    fn test_deserialize_partial_sections() {
        let config: AppConfig = config::Config::builder()
            .set_override("session.secret", "s3cret")
            .unwrap()
            .set_override("password.scheme", "argon2")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.session.secret, "s3cret");
        assert_eq!(config.session.cookie_name, "username");
        assert_eq!(config.password.scheme, PasswordScheme::Argon2);
        assert_eq!(config.server.port, 8080);
    }
}
