//! ID token verification.
//!
//! Verifies JSON Web Tokens issued by the identity provider for this
//! project: signature, expiry, audience (the project id) and issuer.
//!
//! # Pre-conditions
//! - The verifier was built from a valid `AuthConfig` and `VerificationKey`.
//!
//! # Post-conditions
//! - On success, returns the token's claims with a non-empty `sub`.
//! - On failure, returns a descriptive error indicating what went wrong.
//!
//! # Invariants
//! - Verification is stateless and does not modify any external state.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use super::{AuthConfig, VerificationKey};

/// Claims carried by an ID token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// The user's uid.
    pub sub: String,
    /// The project id.
    pub aud: String,
    pub iss: String,
    pub exp: u64,
    #[serde(default)]
    pub iat: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Error returned when ID token verification fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JwtError {
    /// The JWT signature is invalid.
    InvalidSignature,
    /// The JWT has expired.
    TokenExpired,
    /// The token was issued for a different project.
    WrongAudience,
    /// The token was not issued by the expected issuer.
    WrongIssuer,
    /// The JWT is malformed or cannot be parsed.
    MalformedToken,
    /// The 'sub' claim is missing or empty.
    MissingSubClaim,
    /// The decoding key could not be created from the provided configuration.
    InvalidKey(String),
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSignature => write!(f, "invalid JWT signature"),
            Self::TokenExpired => write!(f, "JWT has expired"),
            Self::WrongAudience => write!(f, "JWT audience does not match project"),
            Self::WrongIssuer => write!(f, "JWT issuer does not match project"),
            Self::MalformedToken => write!(f, "malformed JWT"),
            Self::MissingSubClaim => write!(f, "missing 'sub' claim in JWT"),
            Self::InvalidKey(reason) => write!(f, "invalid key: {reason}"),
        }
    }
}

impl std::error::Error for JwtError {}

/// Verifies ID tokens for one project with one key.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
    algorithm: &'static str,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithm", &self.algorithm)
            .field("audience", &self.validation.aud)
            .finish_non_exhaustive()
    }
}

impl TokenVerifier {
    /// Build a verifier expecting tokens for `config`'s project.
    ///
    /// # Errors
    /// Returns `JwtError::InvalidKey` if the key material cannot be loaded.
    pub fn new(config: &AuthConfig, key: &VerificationKey) -> Result<Self, JwtError> {
        let decoding_key = key
            .decoding_key()
            .map_err(|e| JwtError::InvalidKey(e.to_string()))?;

        let mut validation = Validation::new(key.algorithm());
        validation.set_audience(&[config.project_id()]);
        validation.set_issuer(&[config.issuer()]);
        validation.set_required_spec_claims(&["exp", "sub", "aud", "iss"]);

        Ok(Self {
            key: decoding_key,
            validation,
            algorithm: key.algorithm_name(),
        })
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    /// Returns `JwtError` if verification fails for any reason.
    pub fn verify(&self, token: &str) -> Result<IdentityClaims, JwtError> {
        let token_data =
            decode::<IdentityClaims>(token, &self.key, &self.validation).map_err(map_jwt_error)?;

        if token_data.claims.sub.is_empty() {
            return Err(JwtError::MissingSubClaim);
        }
        Ok(token_data.claims)
    }
}

/// Maps jsonwebtoken errors to our JwtError type.
fn map_jwt_error(error: jsonwebtoken::errors::Error) -> JwtError {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
        ErrorKind::InvalidSignature => JwtError::InvalidSignature,
        ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        ErrorKind::InvalidAudience => JwtError::WrongAudience,
        ErrorKind::InvalidIssuer => JwtError::WrongIssuer,
        ErrorKind::MissingRequiredClaim(claim) if claim == "sub" => JwtError::MissingSubClaim,
        _ => JwtError::MalformedToken,
    }
}
