use crate::ApiResult;
use crate::api::required_field;

use serde::Deserialize;

/// Body of `POST /api/token/refresh/`
#[derive(Debug, Deserialize)]
pub struct TokenRefreshRequest {
    #[serde(default)]
    pub refresh: Option<String>,
}

impl TokenRefreshRequest {
    pub fn validate(&self) -> ApiResult<String> {
        required_field(self.refresh.as_deref(), "refresh", true)
    }
}
