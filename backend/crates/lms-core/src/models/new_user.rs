use crate::{CoreError, Result as CoreErrorResult};

pub const MAX_USERNAME_LENGTH: usize = 150;
pub const MAX_NAME_LENGTH: usize = 150;
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Input for account creation. The password is plaintext here and is hashed
/// before it reaches storage.
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub is_active: bool,
}

impl NewUser {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            password: password.into(),
            is_active: true,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        validate_username(&self.username)?;
        validate_email(&self.email)?;

        if self.first_name.chars().count() > MAX_NAME_LENGTH {
            return Err(CoreError::validation(
                "first_name",
                format!("first_name exceeds {} characters", MAX_NAME_LENGTH),
            ));
        }
        if self.last_name.chars().count() > MAX_NAME_LENGTH {
            return Err(CoreError::validation(
                "last_name",
                format!("last_name exceeds {} characters", MAX_NAME_LENGTH),
            ));
        }

        if self.password.is_empty() {
            return Err(CoreError::validation("password", "password cannot be empty"));
        }

        Ok(())
    }
}

/// Letters, digits and `@ . + - _` only.
#[track_caller]
pub fn validate_username(username: &str) -> CoreErrorResult<()> {
    if username.is_empty() {
        return Err(CoreError::validation("username", "username cannot be empty"));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(CoreError::validation(
            "username",
            format!("username exceeds {} characters", MAX_USERNAME_LENGTH),
        ));
    }
    if let Some(bad) = username
        .chars()
        .find(|c| !(c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')))
    {
        return Err(CoreError::validation(
            "username",
            format!("username contains invalid character '{}'", bad),
        ));
    }
    Ok(())
}

/// Empty is allowed; otherwise `local@domain` with both parts non-empty.
#[track_caller]
pub fn validate_email(email: &str) -> CoreErrorResult<()> {
    if email.is_empty() {
        return Ok(());
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(CoreError::validation(
            "email",
            format!("email exceeds {} characters", MAX_EMAIL_LENGTH),
        ));
    }

    let mut parts = email.split('@');
    let valid = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !email.chars().any(char::is_whitespace)
        }
        _ => false,
    };

    if !valid {
        return Err(CoreError::validation(
            "email",
            format!("'{}' is not a valid email address", email),
        ));
    }
    Ok(())
}
