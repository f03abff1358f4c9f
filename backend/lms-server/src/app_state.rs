use lms_auth::{CredentialVerifier, IdentityResolver, JwtValidator, TokenIssuer};

use std::sync::Arc;

use sqlx::SqlitePool;

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    /// Used for readiness probes
    pub pool: SqlitePool,
    pub token_issuer: Arc<TokenIssuer>,
    pub jwt_validator: Arc<JwtValidator>,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub identities: Arc<dyn IdentityResolver>,
}
