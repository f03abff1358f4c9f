pub mod login_response;
#[allow(clippy::module_inception)]
pub mod token;
pub mod token_obtain_request;
pub mod token_refresh_request;
pub mod token_refresh_response;
pub mod token_verify_request;
