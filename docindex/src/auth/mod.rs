//! Authentication module.
//!
//! This module provides the identity configuration, ID token verification
//! and the session handle shared by the rest of the application.
//!
//! # Pre-conditions
//! - The application is configured with a valid API key and auth domain.
//!
//! # Post-conditions
//! - Authentication configuration is immutable once loaded.
//!
//! # Invariants
//! - Session state has exactly one writer, the `IdentityClient`.

pub mod identity_config;
pub mod jwt;
pub mod key;
pub mod session;

pub use identity_config::{AuthConfig, AuthConfigError, ClientAuthConfig};
pub use jwt::{IdentityClaims, JwtError, TokenVerifier};
pub use key::{VerificationKey, VerificationKeyError};
pub use session::{AuthHandle, AuthState, IdentityClient, User};
