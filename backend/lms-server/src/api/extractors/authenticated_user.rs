//! Axum extractors for REST API authentication

use crate::{ApiError, AppState};

use lms_auth::AuthError;
use lms_core::{ErrorLocation, User};

use std::future::Future;
use std::panic::Location;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};

/// The identity behind a valid `Authorization: Bearer <access token>` header
///
/// Rejects with 401 when the header is missing or malformed, the token fails
/// validation, or the user no longer resolves to an active account.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let token = bearer_token(&parts.headers)?;
            let claims = state.jwt_validator.validate_access(token)?;
            let user = state.identities.resolve_identity(&claims).await?;

            log::debug!("Authenticated user {}", user.id);
            Ok(AuthenticatedUser(user))
        }
    }
}

/// Token from a `Bearer` authorization header (scheme is case-insensitive)
#[track_caller]
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let location = Location::caller();

    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AuthError::MissingHeader {
            location: ErrorLocation::from(location),
        })?;

    let value = value.to_str().map_err(|_| AuthError::InvalidToken {
        message: "authorization header is not valid ASCII".to_string(),
        location: ErrorLocation::from(location),
    })?;

    let mut parts = value.split_whitespace();
    let (Some(scheme), token, None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AuthError::InvalidToken {
            message: "authorization header must contain exactly two parts".to_string(),
            location: ErrorLocation::from(location),
        });
    };

    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthError::InvalidScheme {
            location: ErrorLocation::from(location),
        });
    }

    token.ok_or_else(|| AuthError::InvalidToken {
        message: "no credentials provided".to_string(),
        location: ErrorLocation::from(location),
    })
}
