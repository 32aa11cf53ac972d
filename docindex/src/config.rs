//! Server configuration module.
//!
//! This module provides configuration loading for the docindex server from
//! environment variables.
//!
//! # Environment Variables
//!
//! - `DOCINDEX_API_KEY`: Identity provider API key (required)
//! - `DOCINDEX_AUTH_DOMAIN`: Identity provider auth domain (required)
//! - `DOCINDEX_DATABASE_PATH`: SQLite file holding documents (default: `./docs.db`)
//! - `DOCINDEX_LISTEN_PORT`: Port to listen on (default: `5000`)
//! - `DOCINDEX_JWT_PUBLIC_KEY_FILE`: PEM file of the RS256 key that signs ID tokens
//! - `DOCINDEX_JWT_SECRET`: HS256 secret for locally minted tokens
//! - `DOCINDEX_INDEX_HTML`: Built client `index.html` to serve for client routes
//!
//! # Invariants
//!
//! - `auth` is always a valid `AuthConfig`.
//! - At most one token key source is configured.

use std::path::PathBuf;

use crate::auth::{AuthConfig, VerificationKey};

const API_KEY_VAR: &str = "DOCINDEX_API_KEY";
const AUTH_DOMAIN_VAR: &str = "DOCINDEX_AUTH_DOMAIN";
const DATABASE_PATH_VAR: &str = "DOCINDEX_DATABASE_PATH";
const LISTEN_PORT_VAR: &str = "DOCINDEX_LISTEN_PORT";
const JWT_PUBLIC_KEY_FILE_VAR: &str = "DOCINDEX_JWT_PUBLIC_KEY_FILE";
const JWT_SECRET_VAR: &str = "DOCINDEX_JWT_SECRET";
const INDEX_HTML_VAR: &str = "DOCINDEX_INDEX_HTML";

/// Where ID token verification keys come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKeySource {
    /// Mutations are not authenticated.
    None,
    Rs256PublicKeyFile(PathBuf),
    Hs256Secret(String),
}

/// Server configuration.
///
/// # Post-conditions
///
/// - `listen_port` is always in the valid range (1-65535)
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Identity provider project descriptor.
    pub auth: AuthConfig,
    /// SQLite file holding the documents table.
    pub database_path: PathBuf,
    /// Port to listen on for HTTP connections.
    pub listen_port: u16,
    pub token_key: TokenKeySource,
    /// Built client page; a minimal page is served when unset.
    pub index_html: Option<PathBuf>,
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable is missing.
    MissingEnvVar(String),
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEnvVar(name) => {
                write!(f, "missing required environment variable: {name}")
            }
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    /// Default port for the server.
    pub const DEFAULT_PORT: u16 = 5000;
    /// Default database file.
    pub const DEFAULT_DATABASE_PATH: &'static str = "./docs.db";

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or any value is
    /// invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which returns the value of a
    /// variable if it is set.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = required(&lookup, API_KEY_VAR)?;
        let auth_domain = required(&lookup, AUTH_DOMAIN_VAR)?;
        let auth = AuthConfig::new(api_key, auth_domain).map_err(|e| ConfigError::InvalidValue {
            name: AUTH_DOMAIN_VAR.to_string(),
            message: e.to_string(),
        })?;

        let database_path = lookup(DATABASE_PATH_VAR)
            .filter(|value| !value.is_empty())
            .map_or_else(|| PathBuf::from(Self::DEFAULT_DATABASE_PATH), PathBuf::from);
        let listen_port = load_listen_port(&lookup)?;
        let token_key = load_token_key(&lookup)?;
        let index_html = lookup(INDEX_HTML_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            auth,
            database_path,
            listen_port,
            token_key,
            index_html,
        })
    }

    /// Read the configured key material.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the key file cannot be read or
    /// the key is unusable.
    pub fn load_verification_key(&self) -> Result<Option<VerificationKey>, ConfigError> {
        match &self.token_key {
            TokenKeySource::None => Ok(None),
            TokenKeySource::Hs256Secret(secret) => VerificationKey::new_hs256(secret.as_bytes().to_vec())
                .map(Some)
                .map_err(|e| ConfigError::InvalidValue {
                    name: JWT_SECRET_VAR.to_string(),
                    message: e.to_string(),
                }),
            TokenKeySource::Rs256PublicKeyFile(path) => {
                let pem = std::fs::read_to_string(path).map_err(|e| ConfigError::InvalidValue {
                    name: JWT_PUBLIC_KEY_FILE_VAR.to_string(),
                    message: format!("cannot read {}: {e}", path.display()),
                })?;
                VerificationKey::new_rs256(pem)
                    .map(Some)
                    .map_err(|e| ConfigError::InvalidValue {
                        name: JWT_PUBLIC_KEY_FILE_VAR.to_string(),
                        message: e.to_string(),
                    })
            }
        }
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String, ConfigError> {
    let value = lookup(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))?;
    if value.is_empty() {
        return Err(ConfigError::InvalidValue {
            name: name.to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(value)
}

fn load_listen_port(lookup: &impl Fn(&str) -> Option<String>) -> Result<u16, ConfigError> {
    match lookup(LISTEN_PORT_VAR) {
        Some(value) => match value.parse::<u16>() {
            Ok(port) if port > 0 => Ok(port),
            _ => Err(ConfigError::InvalidValue {
                name: LISTEN_PORT_VAR.to_string(),
                message: format!("'{value}' is not a valid port number (must be 1-65535)"),
            }),
        },
        None => Ok(ServerConfig::DEFAULT_PORT),
    }
}

fn load_token_key(lookup: &impl Fn(&str) -> Option<String>) -> Result<TokenKeySource, ConfigError> {
    let public_key_file = lookup(JWT_PUBLIC_KEY_FILE_VAR).filter(|value| !value.is_empty());
    let secret = lookup(JWT_SECRET_VAR).filter(|value| !value.is_empty());

    match (public_key_file, secret) {
        (Some(_), Some(_)) => Err(ConfigError::InvalidValue {
            name: JWT_SECRET_VAR.to_string(),
            message: format!("cannot be combined with {JWT_PUBLIC_KEY_FILE_VAR}"),
        }),
        (Some(path), None) => Ok(TokenKeySource::Rs256PublicKeyFile(PathBuf::from(path))),
        (None, Some(secret)) => Ok(TokenKeySource::Hs256Secret(secret)),
        (None, None) => Ok(TokenKeySource::None),
    }
}
