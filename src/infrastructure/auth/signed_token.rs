//! Tamper-evident session values: `"<payload>|<hex hmac-sha256(secret, payload)>"`

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt::Debug;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

const SEPARATOR: char = '|';
const DIGEST_HEX_LENGTH: usize = 64;

/// Why a signed value was rejected
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidToken {
    #[error("signed value has no '|' separator")]
    MissingSeparator,

    #[error("signature is not a lowercase hex HMAC-SHA256 digest")]
    MalformedSignature,

    #[error("signature does not match payload")]
    SignatureMismatch,
}

/// Signs and verifies values with the process-wide secret
#[derive(Clone)]
pub struct TokenSigner {
    secret: Vec<u8>,
}

impl Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl TokenSigner {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    fn mac(&self, payload: &str) -> HmacSha256 {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());
        mac
    }

    /// Append the signature to `payload`
    pub fn sign(&self, payload: &str) -> String {
        let digest = hex::encode(self.mac(payload).finalize().into_bytes());
        format!("{}{}{}", payload, SEPARATOR, digest)
    }

    /// Return the payload if `signed` is exactly what `sign` produces for it
    pub fn verify<'a>(&self, signed: &'a str) -> Result<&'a str, InvalidToken> {
        let (payload, signature) = signed
            .split_once(SEPARATOR)
            .ok_or(InvalidToken::MissingSeparator)?;

        let canonical = signature.len() == DIGEST_HEX_LENGTH
            && signature
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));

        if !canonical {
            return Err(InvalidToken::MalformedSignature);
        }

        let signature = hex::decode(signature).map_err(|_| InvalidToken::MalformedSignature)?;

        self.mac(payload)
            .verify_slice(&signature)
            .map_err(|_| InvalidToken::SignatureMismatch)?;

        Ok(payload)
    }
}
