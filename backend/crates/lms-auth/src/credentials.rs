//! Seams to the account store.
//!
//! Handlers depend on these traits only; the SQLite repository in `lms-db`
//! is the production implementation and tests may substitute their own.

use crate::{Claims, Result as AuthErrorResult};

use lms_core::User;

use async_trait::async_trait;

#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Check a username/password pair and return the active account it
    /// belongs to. Every rejection is `AuthError::InvalidCredentials`.
    async fn verify_credentials(&self, username: &str, password: &str) -> AuthErrorResult<User>;
}

#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Load the account a validated token was issued for.
    async fn resolve_identity(&self, claims: &Claims) -> AuthErrorResult<User>;
}
