use crate::ApiResult;
use crate::api::required_field;

use serde::Deserialize;

/// Body of `POST /api/token/verify/`
#[derive(Debug, Deserialize)]
pub struct TokenVerifyRequest {
    #[serde(default)]
    pub token: Option<String>,
}

impl TokenVerifyRequest {
    pub fn validate(&self) -> ApiResult<String> {
        required_field(self.token.as_deref(), "token", true)
    }
}
