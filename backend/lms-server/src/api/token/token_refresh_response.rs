use serde::Serialize;

/// New access token minted from a refresh token
#[derive(Debug, Serialize)]
pub struct TokenRefreshResponse {
    pub access: String,
}
