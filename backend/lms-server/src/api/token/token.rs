//! Token REST API handlers
//!
//! Obtain a token pair with credentials, mint a new access token from a
//! refresh token, and check a token's validity.

use crate::{
    ApiResult, AppState, LoginResponse, TokenObtainRequest, TokenRefreshRequest,
    TokenRefreshResponse, TokenVerifyRequest, build_login_response,
};

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::{Value, json};

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/token/
///
/// Exchange username and password for an access/refresh token pair
pub async fn obtain_token(
    State(state): State<AppState>,
    payload: Result<Json<TokenObtainRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(request) = payload?;
    let (username, password) = request.validate()?;

    let user = state
        .credentials
        .verify_credentials(&username, &password)
        .await?;

    let (tokens, _) = state.token_issuer.issue(&user)?;
    log::info!("Issued token pair for user {}", user.id);

    Ok(Json(build_login_response(&user, tokens)))
}

/// POST /api/token/refresh/
///
/// Mint a new access token carrying the refresh token's claims
pub async fn refresh_token(
    State(state): State<AppState>,
    payload: Result<Json<TokenRefreshRequest>, JsonRejection>,
) -> ApiResult<Json<TokenRefreshResponse>> {
    let Json(request) = payload?;
    let refresh = request.validate()?;

    let claims = state.jwt_validator.validate_refresh(&refresh)?;

    // The account must still be usable
    state.identities.resolve_identity(&claims).await?;

    let (access, _) = state.token_issuer.access_from_refresh(&claims)?;
    log::info!("Refreshed access token for user {}", claims.user_id);

    Ok(Json(TokenRefreshResponse { access }))
}

/// POST /api/token/verify/
///
/// 200 with an empty object when the token (of either type) is valid
pub async fn verify_token(
    State(state): State<AppState>,
    payload: Result<Json<TokenVerifyRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = payload?;
    let token = request.validate()?;

    state.jwt_validator.validate(&token)?;

    Ok(Json(json!({})))
}
