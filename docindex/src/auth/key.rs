//! Key material for verifying ID tokens.
//!
//! Production tokens are RS256-signed by the identity provider; the server
//! is given the matching public key as a PEM file. A shared HS256 secret is
//! accepted for local runs and tests, where tokens are minted in-process.

use jsonwebtoken::{Algorithm, DecodingKey};

/// Error returned when key material cannot be used to check signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationKeyError {
    /// The shared HS256 secret has no bytes.
    EmptySecret,
    /// The provider public key is not a PEM-encoded RSA key.
    InvalidPublicKey(String),
}

impl std::fmt::Display for VerificationKeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySecret => f.write_str("shared token secret is empty"),
            Self::InvalidPublicKey(reason) => {
                write!(f, "provider public key is not a PEM RSA key ({reason})")
            }
        }
    }
}

impl std::error::Error for VerificationKeyError {}

/// Key used to check ID token signatures.
#[derive(Debug, Clone)]
pub enum VerificationKey {
    /// Shared secret for locally minted tokens.
    Hs256 { secret: Vec<u8> },
    /// PEM text of the identity provider's RSA public key.
    Rs256 { public_key: String },
}

impl VerificationKey {
    /// # Errors
    /// Returns `VerificationKeyError::EmptySecret` for an empty secret.
    pub fn new_hs256(secret: Vec<u8>) -> Result<Self, VerificationKeyError> {
        let key = Self::Hs256 { secret };
        key.decoding_key()?;
        Ok(key)
    }

    /// # Errors
    /// Returns `VerificationKeyError::InvalidPublicKey` if `public_key` is not
    /// PEM-encoded RSA.
    pub fn new_rs256(public_key: String) -> Result<Self, VerificationKeyError> {
        let key = Self::Rs256 { public_key };
        key.decoding_key()?;
        Ok(key)
    }

    /// Build the `jsonwebtoken` key for this material.
    ///
    /// # Errors
    /// Same checks as the constructors, for keys built from the variants
    /// directly.
    pub fn decoding_key(&self) -> Result<DecodingKey, VerificationKeyError> {
        match self {
            Self::Hs256 { secret } if secret.is_empty() => Err(VerificationKeyError::EmptySecret),
            Self::Hs256 { secret } => Ok(DecodingKey::from_secret(secret)),
            Self::Rs256 { public_key } => DecodingKey::from_rsa_pem(public_key.as_bytes())
                .map_err(|e| VerificationKeyError::InvalidPublicKey(e.to_string())),
        }
    }

    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        match self {
            Self::Hs256 { .. } => Algorithm::HS256,
            Self::Rs256 { .. } => Algorithm::RS256,
        }
    }

    /// Short algorithm label, for logging.
    #[must_use]
    pub const fn algorithm_name(&self) -> &'static str {
        match self {
            Self::Hs256 { .. } => "HS256",
            Self::Rs256 { .. } => "RS256",
        }
    }
}
