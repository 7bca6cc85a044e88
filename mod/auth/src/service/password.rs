//! Password hashing — argon2id PHC strings with per-call random salts.

use argon2::Argon2;
use password_hash::rand_core::OsRng;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::service::AuthError;

/// Hash a plaintext password into a PHC string.
///
/// A fresh salt is drawn from the OS RNG on every call, so the same
/// plaintext never hashes to the same digest twice.
pub fn hash_password(plain: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Internal(format!("password hashing failed: {}", e)))
}

/// Verify a plaintext password against a stored PHC string.
///
/// The argon2 verifier compares digests in constant time. A malformed
/// stored hash verifies as false rather than erroring.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
