use lms_core::NewUser;

pub const ALICE_PASSWORD: &str = "alice-password-123";

/// alice / a@x.com / Alice A
pub fn alice() -> NewUser {
    NewUser::new("alice", ALICE_PASSWORD)
        .with_email("a@x.com")
        .with_name("Alice", "A")
}
