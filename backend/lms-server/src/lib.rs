pub mod api;
pub mod app_state;
pub mod cli;
pub mod create_user;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    extractors::authenticated_user::AuthenticatedUser,
    token::{
        login_response::{LoginResponse, build_login_response},
        token::{obtain_token, refresh_token, verify_token},
        token_obtain_request::TokenObtainRequest,
        token_refresh_request::TokenRefreshRequest,
        token_refresh_response::TokenRefreshResponse,
        token_verify_request::TokenVerifyRequest,
    },
    users::{user_dto::UserDto, users::get_profile},
};
pub use app_state::AppState;

pub use crate::routes::build_router;

#[cfg(test)]
mod tests;
