use crate::{AuthError, Claims, JwtAlgorithm, Result as AuthErrorResult, TokenType};

use lms_core::ErrorLocation;

use std::panic::Location;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

/// Production-grade JWT validator
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    algorithm: Algorithm,
}

impl JwtValidator {
    #[track_caller]
    pub fn new(algorithm: &JwtAlgorithm, leeway_secs: u64) -> AuthErrorResult<Self> {
        let validator = match algorithm {
            JwtAlgorithm::HS256 { secret } => Self::with_hs256(secret),
            JwtAlgorithm::RS256 { public_key_pem, .. } => Self::with_rs256(public_key_pem)?,
        };
        Ok(validator.with_leeway(leeway_secs))
    }

    /// Create validator with HS256 (symmetric secret)
    pub fn with_hs256(secret: &[u8]) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation: Self::strict_validation(Algorithm::HS256),
            algorithm: Algorithm::HS256,
        }
    }

    /// Create validator with RS256 (asymmetric public key)
    #[track_caller]
    pub fn with_rs256(public_key_pem: &str) -> AuthErrorResult<Self> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes()).map_err(|e| {
            AuthError::InvalidToken {
                message: format!("Invalid RSA public key: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        Ok(Self {
            decoding_key,
            validation: Self::strict_validation(Algorithm::RS256),
            algorithm: Algorithm::RS256,
        })
    }

    /// Clock skew tolerance applied to `exp`
    pub fn with_leeway(mut self, leeway_secs: u64) -> Self {
        self.validation.leeway = leeway_secs;
        self
    }

    fn strict_validation(algorithm: Algorithm) -> Validation {
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 0;
        validation
    }

    /// Validate JWT token of either type and return claims
    #[track_caller]
    pub fn validate(&self, token: &str) -> AuthErrorResult<Claims> {
        let location = Location::caller();

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                        location: ErrorLocation::from(location),
                    },
                    ErrorKind::InvalidSignature => AuthError::InvalidToken {
                        message: "signature verification failed".to_string(),
                        location: ErrorLocation::from(location),
                    },
                    _ => AuthError::JwtDecode {
                        source: e,
                        location: ErrorLocation::from(location),
                    },
                }
            })?;

        // Additional claim validation
        token_data.claims.validate()?;

        Ok(token_data.claims)
    }

    /// Validate a token that must be an access token
    #[track_caller]
    pub fn validate_access(&self, token: &str) -> AuthErrorResult<Claims> {
        self.validate_typed(token, TokenType::Access)
    }

    /// Validate a token that must be a refresh token
    #[track_caller]
    pub fn validate_refresh(&self, token: &str) -> AuthErrorResult<Claims> {
        self.validate_typed(token, TokenType::Refresh)
    }

    #[track_caller]
    fn validate_typed(&self, token: &str, expected: TokenType) -> AuthErrorResult<Claims> {
        let claims = self.validate(token)?;

        if claims.token_type != expected {
            return Err(AuthError::WrongTokenType {
                expected: expected.as_str(),
                actual: claims.token_type.as_str(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(claims)
    }

    /// Get the algorithm being used (for logging/debugging)
    pub fn algorithm(&self) -> &str {
        match self.algorithm {
            Algorithm::HS256 => "HS256",
            Algorithm::RS256 => "RS256",
            _ => "unknown",
        }
    }
}
