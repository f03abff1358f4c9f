//! Argon2id password hashing.

use crate::{AuthError, Result as AuthErrorResult};

use lms_core::ErrorLocation;

use std::panic::Location;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Hash `password` with a fresh random salt; returns a PHC string
#[track_caller]
pub fn hash_password(password: &str) -> AuthErrorResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
}

/// `Ok(true)` on match, `Ok(false)` on mismatch, `Err` if `hash` is not a
/// valid PHC string.
#[track_caller]
pub fn verify_password(password: &str, hash: &str) -> AuthErrorResult<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::PasswordHash {
        message: format!("stored hash is malformed: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Burn the same work as a real verification when there is no account to
/// verify against, so lookups for unknown usernames are not measurably faster.
pub fn verify_against_dummy(password: &str) {
    let _ = hash_password(password);
}
