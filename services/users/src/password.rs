//! Password hashing

use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier, password_hash::SaltString};
use tracing::error;

/// One-way password hashing
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password with a fresh salt
    fn hash(&self, plain: &str) -> anyhow::Result<String>;

    /// Check a plaintext password against a stored hash
    fn verify(&self, plain: &str, hash: &str) -> bool;
}

/// Argon2id hasher with the crate's default parameters
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plain: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let hash = Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| {
                error!(error = %e, "argon2 hash_password error");
                anyhow::anyhow!("Failed to hash password: {}", e)
            })?
            .to_string();
        Ok(hash)
    }

    fn verify(&self, plain: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok()
    }
}
