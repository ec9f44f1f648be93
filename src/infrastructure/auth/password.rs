//! Password digests
//!
//! The legacy scheme stores `"<hex sha256(username ‖ password ‖ salt)>,<salt>"`
//! with a five letter salt. Existing records must keep validating, so its
//! byte layout is fixed. Argon2id (PHC strings) is available for new
//! registrations; verification picks the scheme from the stored record.

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as Argon2PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Argon2,
};
use rand::Rng;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::fmt::Debug;
use std::sync::Arc;

use crate::domain::DomainError;

const SALT_LENGTH: usize = 5;
const SALT_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ARGON2_PREFIX: &str = "$argon2";

/// Trait for password digest operations
pub trait PasswordHasher: Send + Sync + Debug {
    /// Produce a storable digest record
    fn hash(&self, username: &str, password: &str) -> Result<String, DomainError>;

    /// Check a password against a stored record.
    ///
    /// A record that cannot be parsed is a data-integrity error, not a mismatch.
    fn verify(&self, username: &str, password: &str, record: &str) -> Result<bool, DomainError>;

    /// Whether a verified record should be replaced by a fresh `hash`
    fn needs_rehash(&self, _record: &str) -> bool {
        false
    }
}

/// Random five letter salt
pub fn make_salt() -> String {
    let mut rng = rand::thread_rng();

    (0..SALT_LENGTH)
        .map(|_| SALT_ALPHABET[rng.gen_range(0..SALT_ALPHABET.len())] as char)
        .collect()
}

/// Build the legacy `"<digest>,<salt>"` record. An absent or empty salt is generated.
pub fn hash_password(username: &str, password: &str, salt: Option<&str>) -> String {
    let salt = match salt {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => make_salt(),
    };

    let mut hasher = Sha256::new();
    hasher.update(username.as_bytes());
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    let digest = hex::encode(hasher.finalize());

    format!("{},{}", digest, salt)
}

/// Check a legacy record. Malformed records simply do not match.
pub fn verify_password(username: &str, password: &str, record: &str) -> bool {
    let Some((_, salt)) = record.split_once(',') else {
        return false;
    };

    if salt.is_empty() {
        return false;
    }

    let expected = hash_password(username, password, Some(salt));
    constant_time_compare(&expected, record)
}

/// Constant-time string comparison to prevent timing attacks
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

/// SHA-256 + five letter salt, byte-compatible with existing records
#[derive(Debug, Clone, Default)]
pub struct LegacySha256Hasher;

impl LegacySha256Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for LegacySha256Hasher {
    fn hash(&self, username: &str, password: &str) -> Result<String, DomainError> {
        Ok(hash_password(username, password, None))
    }

    fn verify(&self, username: &str, password: &str, record: &str) -> Result<bool, DomainError> {
        match record.split_once(',') {
            Some((digest, salt)) if !digest.is_empty() && !salt.is_empty() => {
                Ok(verify_password(username, password, record))
            }
            _ => Err(DomainError::data_integrity(
                "Stored password digest is not in '<digest>,<salt>' form",
            )),
        }
    }
}

/// Argon2id with a random salt, stored as a PHC string
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, _username: &str, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, _username: &str, password: &str, record: &str) -> Result<bool, DomainError> {
        let parsed = PasswordHash::new(record).map_err(|e| {
            DomainError::data_integrity(format!("Stored password hash is not a PHC string: {}", e))
        })?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

/// Digest scheme used for new registrations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PasswordScheme {
    #[default]
    LegacySha256,
    Argon2,
}

/// Hashes with the configured scheme and verifies whichever scheme a record uses
#[derive(Debug, Clone)]
pub struct SchemeAwareHasher {
    scheme: PasswordScheme,
    legacy: LegacySha256Hasher,
    argon2: Argon2Hasher,
}

impl SchemeAwareHasher {
    pub fn new(scheme: PasswordScheme) -> Self {
        Self {
            scheme,
            legacy: LegacySha256Hasher::new(),
            argon2: Argon2Hasher::new(),
        }
    }

    pub fn scheme(&self) -> PasswordScheme {
        self.scheme
    }

    fn hasher_for_record(&self, record: &str) -> &dyn PasswordHasher {
        if record.starts_with(ARGON2_PREFIX) {
            &self.argon2
        } else {
            &self.legacy
        }
    }
}

impl PasswordHasher for SchemeAwareHasher {
    fn hash(&self, username: &str, password: &str) -> Result<String, DomainError> {
        match self.scheme {
            PasswordScheme::LegacySha256 => self.legacy.hash(username, password),
            PasswordScheme::Argon2 => self.argon2.hash(username, password),
        }
    }

    fn verify(&self, username: &str, password: &str, record: &str) -> Result<bool, DomainError> {
        self.hasher_for_record(record)
            .verify(username, password, record)
    }

    /// Legacy records are upgraded once argon2 is configured, never the reverse
    fn needs_rehash(&self, record: &str) -> bool {
        self.scheme == PasswordScheme::Argon2 && !record.starts_with(ARGON2_PREFIX)
    }
}

/// Build the process-wide hasher for a scheme
pub fn build_password_hasher(scheme: PasswordScheme) -> Arc<dyn PasswordHasher> {
    Arc::new(SchemeAwareHasher::new(scheme))
}
