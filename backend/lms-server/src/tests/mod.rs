mod bearer_token;

use lms_core::User;

use chrono::Utc;

pub(crate) fn test_user() -> User {
    User {
        id: 7,
        username: "alice".to_string(),
        email: "a@x.com".to_string(),
        first_name: "Alice".to_string(),
        last_name: "A".to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        is_active: true,
        date_joined: Utc::now(),
    }
}
