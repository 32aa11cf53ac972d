//! Identity provider project descriptor.
//!
//! # Pre-conditions
//! - `api_key` and `auth_domain` come from the identity provider's console.
//!
//! # Post-conditions
//! - `AuthConfig` instances are immutable once created.
//!
//! # Invariants
//! - `api_key` is never empty.
//! - `auth_domain` is a bare host name: no scheme, path, port or whitespace.

use serde::Serialize;

/// Suffixes the provider uses for hosted auth domains.
const HOSTED_DOMAIN_SUFFIXES: [&str; 2] = [".firebaseapp.com", ".web.app"];

/// Issuer prefix of provider-issued ID tokens.
const TOKEN_ISSUER_PREFIX: &str = "https://securetoken.google.com/";

/// Error returned when an identity config is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthConfigError {
    EmptyApiKey,
    EmptyAuthDomain,
    InvalidAuthDomain(String),
}

impl std::fmt::Display for AuthConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyApiKey => write!(f, "api key must not be empty"),
            Self::EmptyAuthDomain => write!(f, "auth domain must not be empty"),
            Self::InvalidAuthDomain(domain) => {
                write!(f, "auth domain '{domain}' must be a bare host name")
            }
        }
    }
}

impl std::error::Error for AuthConfigError {}

/// The static identity configuration of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    api_key: String,
    auth_domain: String,
}

impl AuthConfig {
    /// Create a validated identity configuration.
    ///
    /// # Errors
    /// Returns an error if either field is empty or the auth domain is not a
    /// bare host name.
    pub fn new(api_key: impl Into<String>, auth_domain: impl Into<String>) -> Result<Self, AuthConfigError> {
        let api_key = api_key.into();
        let auth_domain = auth_domain.into();

        if api_key.is_empty() {
            return Err(AuthConfigError::EmptyApiKey);
        }
        if auth_domain.is_empty() {
            return Err(AuthConfigError::EmptyAuthDomain);
        }
        let valid_host = auth_domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
            && !auth_domain.starts_with('.')
            && !auth_domain.ends_with('.')
            && !auth_domain.contains("..");
        if !valid_host {
            return Err(AuthConfigError::InvalidAuthDomain(auth_domain));
        }

        Ok(Self { api_key, auth_domain })
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn auth_domain(&self) -> &str {
        &self.auth_domain
    }

    /// The provider project this config belongs to.
    ///
    /// Hosted domains (`<project>.firebaseapp.com`, `<project>.web.app`) map
    /// to their project; custom domains fall back to their first label.
    #[must_use]
    pub fn project_id(&self) -> &str {
        for suffix in HOSTED_DOMAIN_SUFFIXES {
            if let Some(project) = self.auth_domain.strip_suffix(suffix) {
                if !project.is_empty() {
                    return project;
                }
            }
        }
        self.auth_domain
            .split('.')
            .next()
            .unwrap_or(&self.auth_domain)
    }

    /// The `iss` claim expected on ID tokens for this project.
    #[must_use]
    pub fn issuer(&self) -> String {
        format!("{TOKEN_ISSUER_PREFIX}{}", self.project_id())
    }

    /// The config as the browser client consumes it.
    #[must_use]
    pub fn client_config(&self) -> ClientAuthConfig<'_> {
        ClientAuthConfig {
            api_key: &self.api_key,
            auth_domain: &self.auth_domain,
            project_id: self.project_id(),
        }
    }
}

/// Serialized form handed to the browser client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientAuthConfig<'a> {
    pub api_key: &'a str,
    pub auth_domain: &'a str,
    pub project_id: &'a str,
}
