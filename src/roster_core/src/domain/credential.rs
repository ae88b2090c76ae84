use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::domain::password::Password;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Failed to hash password: {0}")]
    Hash(String),
}

/// A stored one-way hash of an account's password, in PHC string form.
///
/// Plaintext never enters the store; verification compares through Argon2id
/// and reveals nothing about partial matches.
#[derive(Debug, Clone)]
pub struct Credential(String);

impl Credential {
    /// Wrap a PHC string loaded from the store.
    pub fn from_phc(phc: String) -> Self {
        Self(phc)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn hash(password: &Password) -> Result<Self, CredentialError> {
        let salt = SaltString::generate(rand_core::OsRng);
        hasher()
            .map_err(CredentialError::Hash)?
            .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
            .map(|hash| Self(hash.to_string()))
            .map_err(|e| CredentialError::Hash(e.to_string()))
    }

    pub fn verify(&self, candidate: &Password) -> bool {
        let Ok(expected) = PasswordHash::new(&self.0) else {
            return false;
        };
        let Ok(hasher) = hasher() else {
            return false;
        };
        hasher
            .verify_password(candidate.as_ref().expose_secret().as_bytes(), &expected)
            .is_ok()
    }
}

fn hasher() -> Result<Argon2<'static>, String> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
    ))
}
