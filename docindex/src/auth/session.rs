//! Identity client and the shared authentication handle.
//!
//! The `IdentityClient` is built once at startup from the project's
//! `AuthConfig` and is the only writer of session state. Everything else
//! holds an `AuthHandle`, a read-only view that can be cloned freely and
//! passed to whichever component needs auth state.
//!
//! # Post-conditions
//! - A new client starts in `AuthState::Initializing`; handles must tolerate
//!   this transient unauthenticated state until `restore_session` runs.
//!
//! # Invariants
//! - A failed sign-in never changes the published state.
//! - Handles cannot modify the session.

use tokio::sync::watch;

use super::{AuthConfig, IdentityClaims, JwtError, TokenVerifier, VerificationKey};

/// The signed-in user, as described by a verified ID token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl From<IdentityClaims> for User {
    fn from(claims: IdentityClaims) -> Self {
        Self {
            uid: claims.sub,
            email: claims.email,
            display_name: claims.name,
        }
    }
}

/// Current session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// The initial session has not been restored yet.
    Initializing,
    SignedOut,
    SignedIn(User),
}

impl AuthState {
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::SignedIn(user) => Some(user),
            Self::Initializing | Self::SignedOut => None,
        }
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Initializing)
    }
}

/// The identity provider client. Sole writer of the session state.
#[derive(Debug)]
pub struct IdentityClient {
    config: AuthConfig,
    verifier: TokenVerifier,
    state: watch::Sender<AuthState>,
}

impl IdentityClient {
    /// Set up the client for `config`'s project.
    ///
    /// # Errors
    /// Returns `JwtError::InvalidKey` if the key cannot be used for
    /// verification. Callers treat this as fatal.
    pub fn initialize(config: AuthConfig, key: &VerificationKey) -> Result<Self, JwtError> {
        let verifier = TokenVerifier::new(&config, key)?;
        let (state, _) = watch::channel(AuthState::Initializing);
        tracing::debug!(
            "identity client initialized for project {} ({})",
            config.project_id(),
            key.algorithm_name()
        );
        Ok(Self {
            config,
            verifier,
            state,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// A new read-only handle on the session.
    #[must_use]
    pub fn handle(&self) -> AuthHandle {
        AuthHandle {
            state: self.state.subscribe(),
        }
    }

    /// Resolve the initial session from a persisted ID token, if any.
    ///
    /// A token that no longer verifies resolves to `SignedOut`.
    pub fn restore_session(&self, persisted_token: Option<&str>) -> AuthState {
        let state = match persisted_token.map(|token| self.verifier.verify(token)) {
            Some(Ok(claims)) => AuthState::SignedIn(User::from(claims)),
            Some(Err(e)) => {
                tracing::warn!("discarding persisted session: {e}");
                AuthState::SignedOut
            }
            None => AuthState::SignedOut,
        };
        self.state.send_replace(state.clone());
        state
    }

    /// Identify the bearer of `token` without touching the session.
    ///
    /// # Errors
    /// Returns the verification error.
    pub fn verify(&self, token: &str) -> Result<User, JwtError> {
        self.verifier.verify(token).map(User::from)
    }

    /// Sign in with an ID token obtained from the identity provider.
    ///
    /// # Errors
    /// Returns the verification error; the session is left unchanged.
    pub fn sign_in_with_id_token(&self, token: &str) -> Result<User, JwtError> {
        let user = self.verify(token)?;
        tracing::info!("user {} signed in", user.uid);
        self.state.send_replace(AuthState::SignedIn(user.clone()));
        Ok(user)
    }

    pub fn sign_out(&self) {
        let previous = self.state.send_replace(AuthState::SignedOut);
        if let Some(user) = previous.user() {
            tracing::info!("user {} signed out", user.uid);
        }
    }
}

/// Read-only, cloneable view of the session.
#[derive(Debug, Clone)]
pub struct AuthHandle {
    state: watch::Receiver<AuthState>,
}

impl AuthHandle {
    /// A handle on a session that is signed out and has no identity client
    /// behind it.
    #[must_use]
    pub fn signed_out() -> Self {
        let (_, state) = watch::channel(AuthState::SignedOut);
        Self { state }
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().user().is_some()
    }

    /// Wait until the initial session is restored.
    ///
    /// If the identity client is dropped first, the session is treated as
    /// signed out.
    pub async fn wait_until_resolved(&mut self) -> AuthState {
        match self.state.wait_for(AuthState::is_resolved).await {
            Ok(state) => state.clone(),
            Err(_) => AuthState::SignedOut,
        }
    }

    /// Wait for the next state change. Returns `None` once the identity
    /// client is gone.
    pub async fn changed(&mut self) -> Option<AuthState> {
        self.state.changed().await.ok()?;
        Some(self.state.borrow_and_update().clone())
    }
}
