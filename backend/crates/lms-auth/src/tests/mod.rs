
use lms_core::User;

use chrono::Utc;

pub(crate) const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

pub(crate) fn test_user() -> User {
    User {
        id: 7,
        username: "alice".to_string(),
        email: "a@x.com".to_string(),
        first_name: "Alice".to_string(),
        last_name: "A".to_string(),
        password_hash: "unused".to_string(),
        is_active: true,
        date_joined: Utc::now(),
    }
}
