//! Password hashing with Argon2id.
//!
//! Hashing and verification are CPU-bound, so both run on Tokio's blocking
//! pool rather than on the async worker threads.

use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use zeroize::Zeroizing;

use super::{Error, Password};

/// PHC-formatted Argon2 hash as stored in the users table.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a hash loaded from storage.
    pub fn from_stored(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Hash a validated password with a fresh random salt.
    pub async fn generate(password: &Password) -> Result<Self, Error> {
        let secret = Zeroizing::new(password.expose().to_owned());
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(secret.as_bytes(), &salt)
                .map(|hash| Self(hash.to_string()))
                .map_err(|err| Error::internal(format!("password hashing failed: {err}")))
        })
        .await
        .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
    }

    /// Check a candidate password against this hash.
    ///
    /// Malformed stored hashes verify as `false`.
    pub async fn verify(&self, candidate: &str) -> bool {
        let encoded = self.0.clone();
        let candidate = Zeroizing::new(candidate.to_owned());
        tokio::task::spawn_blocking(move || {
            let Ok(parsed) = argon2::password_hash::PasswordHash::new(&encoded) else {
                tracing::warn!("stored password hash is not valid PHC format");
                return false;
            };
            Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok()
        })
        .await
        .unwrap_or(false)
    }

    /// Encoded hash for persistence adapters.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}
