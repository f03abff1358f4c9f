//! User entity - the identity every token is issued for.

use std::fmt;

use chrono::{DateTime, Utc};

/// Persisted account record.
///
/// `password_hash`, `is_active` and `date_joined` are storage concerns and
/// never leave the server; client-facing shapes are built from the public
/// fields only.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Argon2id PHC string
    pub password_hash: String,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
}

impl User {
    /// "First Last", trimmed; empty when neither name is set
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password_hash", &"<redacted>")
            .field("is_active", &self.is_active)
            .field("date_joined", &self.date_joined)
            .finish()
    }
}
