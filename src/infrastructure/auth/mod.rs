//! Authentication infrastructure module
//!
//! Password digests, HMAC-signed session values, and the cookie session manager.

mod password;
mod session;
mod signed_token;

pub use password::{
    build_password_hasher, hash_password, make_salt, verify_password, Argon2Hasher,
    LegacySha256Hasher, PasswordHasher, PasswordScheme, SchemeAwareHasher,
};
pub use session::{SessionManager, SessionToken};
pub use signed_token::{InvalidToken, TokenSigner};
