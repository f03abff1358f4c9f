use crate::UserDto;

use lms_auth::TokenPair;
use lms_core::User;

use serde::Serialize;

/// Successful login: both tokens and the public part of the identity
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: UserDto,
}

/// Pure assembly of the login body; `user` carries exactly the five public fields
pub fn build_login_response(user: &User, tokens: TokenPair) -> LoginResponse {
    LoginResponse {
        access: tokens.access,
        refresh: tokens.refresh,
        user: UserDto::from(user),
    }
}
