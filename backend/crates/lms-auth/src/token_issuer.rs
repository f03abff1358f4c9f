use crate::{
    AuthError, Claims, JwtAlgorithm, ProfileClaims, Result as AuthErrorResult, TokenLifetimes,
    TokenPair, TokenType, add_claims, base_claims,
};

use lms_core::{ErrorLocation, User};

use std::panic::Location;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use log::debug;

/// Signs token pairs for authenticated users.
///
/// The refresh token is built first (standard claims plus [`ProfileClaims`]);
/// the access token is derived from it and inherits every non-standard claim.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    header: Header,
    lifetimes: TokenLifetimes,
}

impl TokenIssuer {
    #[track_caller]
    pub fn new(algorithm: &JwtAlgorithm, lifetimes: TokenLifetimes) -> AuthErrorResult<Self> {
        match algorithm {
            JwtAlgorithm::HS256 { secret } => Ok(Self::with_hs256(secret, lifetimes)),
            JwtAlgorithm::RS256 {
                private_key_pem, ..
            } => Self::with_rs256(private_key_pem, lifetimes),
        }
    }

    /// Create issuer with HS256 (symmetric secret)
    pub fn with_hs256(secret: &[u8], lifetimes: TokenLifetimes) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            header: Header::new(Algorithm::HS256),
            lifetimes,
        }
    }

    /// Create issuer with RS256 (asymmetric private key)
    #[track_caller]
    pub fn with_rs256(private_key_pem: &str, lifetimes: TokenLifetimes) -> AuthErrorResult<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes()).map_err(|e| {
            AuthError::InvalidToken {
                message: format!("Invalid RSA private key: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        Ok(Self {
            encoding_key,
            header: Header::new(Algorithm::RS256),
            lifetimes,
        })
    }

    pub fn lifetimes(&self) -> TokenLifetimes {
        self.lifetimes
    }

    /// Issue a token pair for `user`, returning the pair and the access claims
    pub fn issue(&self, user: &User) -> AuthErrorResult<(TokenPair, Claims)> {
        self.issue_at(user, Utc::now())
    }

    pub fn issue_at(&self, user: &User, now: DateTime<Utc>) -> AuthErrorResult<(TokenPair, Claims)> {
        let (refresh, refresh_claims) = self.refresh_token_at(user, now)?;
        let (access, access_claims) = self.access_from_refresh_at(&refresh_claims, now)?;

        debug!(
            "Issued token pair for user {} (access jti={}, refresh jti={})",
            user.id, access_claims.jti, refresh_claims.jti
        );

        Ok((TokenPair { access, refresh }, access_claims))
    }

    /// Refresh token: standard claims plus the profile claims
    pub fn refresh_token_at(
        &self,
        user: &User,
        now: DateTime<Utc>,
    ) -> AuthErrorResult<(String, Claims)> {
        let claims = base_claims(user.id, TokenType::Refresh, self.lifetimes.refresh, now);
        let claims = add_claims(claims, &ProfileClaims::for_user(user))?;
        let token = self.sign(&claims)?;
        Ok((token, claims))
    }

    /// New access token carrying every additional claim of `refresh`
    pub fn access_from_refresh(&self, refresh: &Claims) -> AuthErrorResult<(String, Claims)> {
        self.access_from_refresh_at(refresh, Utc::now())
    }

    pub fn access_from_refresh_at(
        &self,
        refresh: &Claims,
        now: DateTime<Utc>,
    ) -> AuthErrorResult<(String, Claims)> {
        let mut claims = base_claims(refresh.user_id, TokenType::Access, self.lifetimes.access, now);
        claims.extra = refresh.extra.clone();
        let token = self.sign(&claims)?;
        Ok((token, claims))
    }

    #[track_caller]
    fn sign(&self, claims: &Claims) -> AuthErrorResult<String> {
        encode(&self.header, claims, &self.encoding_key).map_err(|e| AuthError::JwtEncode {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
