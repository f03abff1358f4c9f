use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ACCESS_TOKEN_LIFETIME_SECS, DEFAULT_LEEWAY_SECS,
    DEFAULT_REFRESH_TOKEN_LIFETIME_SECS, MAX_ACCESS_TOKEN_LIFETIME_SECS, MAX_LEEWAY_SECS,
    MAX_REFRESH_TOKEN_LIFETIME_SECS, MIN_JWT_SECRET_LENGTH,
};

use std::path::Path;

use serde::Deserialize;

/// Token signing configuration.
///
/// Exactly one key source is used: `jwt_secret` (HS256) wins when set,
/// otherwise the RSA key pair (RS256) is required.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 shared secret (at least 32 characters)
    pub jwt_secret: Option<String>,
    /// RS256 private key PEM, relative to the config directory
    pub jwt_private_key_path: Option<String>,
    /// RS256 public key PEM, relative to the config directory
    pub jwt_public_key_path: Option<String>,
    pub access_token_lifetime_secs: u64,
    pub refresh_token_lifetime_secs: u64,
    /// Clock skew tolerance when checking `exp`
    pub leeway_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            jwt_private_key_path: None,
            jwt_public_key_path: None,
            access_token_lifetime_secs: DEFAULT_ACCESS_TOKEN_LIFETIME_SECS,
            refresh_token_lifetime_secs: DEFAULT_REFRESH_TOKEN_LIFETIME_SECS,
            leeway_secs: DEFAULT_LEEWAY_SECS,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self, config_dir: &Path) -> ConfigErrorResult<()> {
        self.validate_keys(config_dir)?;
        self.validate_lifetimes()
    }

    /// "HS256", "RS256" or "none" for logging
    pub fn algorithm_name(&self) -> &'static str {
        if self.jwt_secret.is_some() {
            "HS256"
        } else if self.jwt_private_key_path.is_some() && self.jwt_public_key_path.is_some() {
            "RS256"
        } else {
            "none"
        }
    }

    fn validate_keys(&self, config_dir: &Path) -> ConfigErrorResult<()> {
        if let Some(ref secret) = self.jwt_secret {
            if secret.chars().count() < MIN_JWT_SECRET_LENGTH {
                return Err(ConfigError::auth(format!(
                    "auth.jwt_secret must be at least {} characters",
                    MIN_JWT_SECRET_LENGTH
                )));
            }
            return Ok(());
        }

        match (&self.jwt_private_key_path, &self.jwt_public_key_path) {
            (Some(private_path), Some(public_path)) => {
                Self::validate_key_path("auth.jwt_private_key_path", private_path, config_dir)?;
                Self::validate_key_path("auth.jwt_public_key_path", public_path, config_dir)
            }
            (None, None) => Err(ConfigError::auth(
                "either auth.jwt_secret or auth.jwt_private_key_path + auth.jwt_public_key_path must be set",
            )),
            _ => Err(ConfigError::auth(
                "auth.jwt_private_key_path and auth.jwt_public_key_path must be set together",
            )),
        }
    }

    fn validate_key_path(name: &str, path: &str, config_dir: &Path) -> ConfigErrorResult<()> {
        if Path::new(path).is_absolute() || path.contains("..") {
            return Err(ConfigError::auth(format!(
                "{} must be relative and cannot contain '..'",
                name
            )));
        }

        let full_path = config_dir.join(path);
        if !full_path.exists() {
            return Err(ConfigError::auth(format!(
                "{} not found: {}",
                name,
                full_path.display()
            )));
        }

        Ok(())
    }

    fn validate_lifetimes(&self) -> ConfigErrorResult<()> {
        if self.access_token_lifetime_secs == 0
            || self.access_token_lifetime_secs > MAX_ACCESS_TOKEN_LIFETIME_SECS
        {
            return Err(ConfigError::auth(format!(
                "auth.access_token_lifetime_secs must be 1-{}, got {}",
                MAX_ACCESS_TOKEN_LIFETIME_SECS, self.access_token_lifetime_secs
            )));
        }

        if self.refresh_token_lifetime_secs < self.access_token_lifetime_secs
            || self.refresh_token_lifetime_secs > MAX_REFRESH_TOKEN_LIFETIME_SECS
        {
            return Err(ConfigError::auth(format!(
                "auth.refresh_token_lifetime_secs must be between access_token_lifetime_secs ({}) and {}, got {}",
                self.access_token_lifetime_secs,
                MAX_REFRESH_TOKEN_LIFETIME_SECS,
                self.refresh_token_lifetime_secs
            )));
        }

        if self.leeway_secs > MAX_LEEWAY_SECS {
            return Err(ConfigError::auth(format!(
                "auth.leeway_secs must be 0-{}, got {}",
                MAX_LEEWAY_SECS, self.leeway_secs
            )));
        }

        Ok(())
    }
}
