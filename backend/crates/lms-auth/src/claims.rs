//! Token payloads.
//!
//! A payload is built in two steps: [`base_claims`] produces the standard
//! claims every token carries, and [`add_claims`] merges any additional
//! serializable object on top. Additional claims are flattened into the
//! payload, so the signed JSON stays a single flat object.

use crate::{AuthError, Result as AuthErrorResult, TokenType};

use std::panic::Location;

use chrono::{DateTime, Duration, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Claim names owned by the base scheme; additional claims may not reuse them
pub const STANDARD_CLAIMS: [&str; 5] = ["token_type", "exp", "iat", "jti", "user_id"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub token_type: TokenType,
    /// Expiration timestamp (Unix)
    pub exp: i64,
    /// Issued at timestamp (Unix)
    pub iat: i64,
    /// Unique token identifier
    pub jti: String,
    /// Subject: id of the user the token was issued for
    pub user_id: i64,
    /// Claims added on top of the standard set
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Standard claims for `user_id`, valid for `lifetime` from `now`.
pub fn base_claims(
    user_id: i64,
    token_type: TokenType,
    lifetime: Duration,
    now: DateTime<Utc>,
) -> Claims {
    Claims {
        token_type,
        exp: (now + lifetime).timestamp(),
        iat: now.timestamp(),
        jti: Uuid::new_v4().simple().to_string(),
        user_id,
        extra: Map::new(),
    }
}

/// Merge the fields of `extra` (which must serialize to a JSON object) into
/// `claims`. Later values win over earlier additional claims; standard claim
/// names are rejected.
#[track_caller]
pub fn add_claims<T: Serialize>(mut claims: Claims, extra: &T) -> AuthErrorResult<Claims> {
    let location = Location::caller();

    let fields = match serde_json::to_value(extra) {
        Ok(Value::Object(fields)) => fields,
        Ok(other) => {
            return Err(AuthError::InvalidClaim {
                claim: "<extra>".to_string(),
                message: format!("additional claims must be an object, got {}", other),
                location: ErrorLocation::from(location),
            });
        }
        Err(e) => {
            return Err(AuthError::InvalidClaim {
                claim: "<extra>".to_string(),
                message: format!("additional claims failed to serialize: {}", e),
                location: ErrorLocation::from(location),
            });
        }
    };

    for (name, value) in fields {
        if STANDARD_CLAIMS.contains(&name.as_str()) {
            return Err(AuthError::InvalidClaim {
                claim: name,
                message: "cannot overwrite a standard claim".to_string(),
                location: ErrorLocation::from(location),
            });
        }
        claims.extra.insert(name, value);
    }

    Ok(claims)
}

impl Claims {
    /// Validate claims after JWT signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.jti.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "jti".to_string(),
                message: "jti cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.user_id <= 0 {
            return Err(AuthError::InvalidClaim {
                claim: "user_id".to_string(),
                message: format!("user_id must be positive, got {}", self.user_id),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Look up an additional claim by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    /// Read the additional claims back as a typed struct
    #[track_caller]
    pub fn extra_as<T: DeserializeOwned>(&self) -> AuthErrorResult<T> {
        serde_json::from_value(Value::Object(self.extra.clone())).map_err(|e| {
            AuthError::InvalidClaim {
                claim: "<extra>".to_string(),
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }
}
