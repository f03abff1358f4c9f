use crate::ApiResult;
use crate::api::required_field;

use serde::Deserialize;

/// Body of `POST /api/token/`
#[derive(Debug, Deserialize)]
pub struct TokenObtainRequest {
    #[serde(default)]
    pub username: Option<String>,

    /// Never trimmed
    #[serde(default)]
    pub password: Option<String>,
}

impl TokenObtainRequest {
    /// Returns `(username, password)` once both are present and non-blank
    pub fn validate(&self) -> ApiResult<(String, String)> {
        let username = required_field(self.username.as_deref(), "username", true)?;
        let password = required_field(self.password.as_deref(), "password", false)?;
        Ok((username, password))
    }
}
