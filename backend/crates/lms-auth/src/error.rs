use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No active account found with the given credentials {location}")]
    InvalidCredentials { location: ErrorLocation },

    #[error("User account {user_id} is disabled {location}")]
    InactiveAccount {
        user_id: i64,
        location: ErrorLocation,
    },

    #[error("User {user_id} not found {location}")]
    UserNotFound {
        user_id: i64,
        location: ErrorLocation,
    },

    #[error("Missing authorization header {location}")]
    MissingHeader { location: ErrorLocation },

    #[error("Invalid authorization scheme: expected 'Bearer' {location}")]
    InvalidScheme { location: ErrorLocation },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Invalid token: {message} {location}")]
    InvalidToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("JWT encode failed: {source} {location}")]
    JwtEncode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Token has wrong type: expected '{expected}', got '{actual}' {location}")]
    WrongTokenType {
        expected: &'static str,
        actual: &'static str,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Password hashing failed: {message} {location}")]
    PasswordHash {
        message: String,
        location: ErrorLocation,
    },

    #[error("User store failure: {message} {location}")]
    Store {
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Stable machine-readable code for client responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials { .. } => "AUTHENTICATION_FAILED",
            Self::InactiveAccount { .. } => "USER_INACTIVE",
            Self::UserNotFound { .. } => "USER_NOT_FOUND",
            Self::MissingHeader { .. } => "NOT_AUTHENTICATED",
            Self::InvalidScheme { .. } => "NOT_AUTHENTICATED",
            Self::TokenExpired { .. } => "TOKEN_NOT_VALID",
            Self::InvalidToken { .. } => "TOKEN_NOT_VALID",
            Self::JwtDecode { .. } => "TOKEN_NOT_VALID",
            Self::WrongTokenType { .. } => "TOKEN_NOT_VALID",
            Self::InvalidClaim { .. } => "TOKEN_NOT_VALID",
            Self::JwtEncode { .. } => "INTERNAL_ERROR",
            Self::PasswordHash { .. } => "INTERNAL_ERROR",
            Self::Store { .. } => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show to a client (no locations, no internals)
    pub fn client_message(&self) -> String {
        match self {
            Self::InvalidCredentials { .. } => {
                "No active account found with the given credentials".to_string()
            }
            Self::InactiveAccount { .. } => "User is inactive".to_string(),
            Self::UserNotFound { .. } => "User not found".to_string(),
            Self::MissingHeader { .. } | Self::InvalidScheme { .. } => {
                "Authentication credentials were not provided".to_string()
            }
            Self::TokenExpired { .. } => "Token is expired".to_string(),
            Self::InvalidToken { .. } | Self::JwtDecode { .. } | Self::InvalidClaim { .. } => {
                "Token is invalid".to_string()
            }
            Self::WrongTokenType { expected, .. } => {
                format!("Token has wrong type, expected {} token", expected)
            }
            Self::JwtEncode { .. } | Self::PasswordHash { .. } | Self::Store { .. } => {
                "Internal server error".to_string()
            }
        }
    }

    /// True for failures caused by the server rather than the caller
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::JwtEncode { .. } | Self::PasswordHash { .. } | Self::Store { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
