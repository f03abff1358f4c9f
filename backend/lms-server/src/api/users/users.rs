//! User REST API handlers

use crate::{AuthenticatedUser, UserDto};

use axum::Json;

/// GET /api/users/me/
///
/// Profile of the authenticated caller
pub async fn get_profile(AuthenticatedUser(user): AuthenticatedUser) -> Json<UserDto> {
    Json(UserDto::from(&user))
}
