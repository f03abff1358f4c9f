pub mod claims;
pub mod credentials;
pub mod error;
pub mod jwt_algorithm;
pub mod jwt_validator;
pub mod password;
pub mod profile_claims;
pub mod token_issuer;
pub mod token_lifetimes;
pub mod token_pair;
pub mod token_type;

pub use claims::{Claims, add_claims, base_claims};
pub use credentials::{CredentialVerifier, IdentityResolver};
pub use error::{AuthError, Result};
pub use jwt_algorithm::JwtAlgorithm;
pub use jwt_validator::JwtValidator;
pub use profile_claims::ProfileClaims;
pub use token_issuer::TokenIssuer;
pub use token_lifetimes::TokenLifetimes;
pub use token_pair::TokenPair;
pub use token_type::TokenType;

#[cfg(test)]
mod tests;
