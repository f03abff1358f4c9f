use lms_core::User;

use serde::{Deserialize, Serialize};

/// Role claim stamped on every token. Not derived from the account.
pub const DEFAULT_ROLE: &str = "instructor";
/// Premium claim stamped on every token. Not derived from the account.
pub const DEFAULT_PREMIUM: bool = true;

/// Additional claims carried by every issued token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileClaims {
    pub username: String,
    pub email: String,
    pub role: String,
    pub premium: bool,
}

impl ProfileClaims {
    pub fn for_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            role: DEFAULT_ROLE.to_string(),
            premium: DEFAULT_PREMIUM,
        }
    }
}
