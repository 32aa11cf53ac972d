//! Bearer-token extraction for protected endpoints.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use super::{ApiError, AppState};
use crate::auth::User;

const BEARER_SCHEME: &str = "Bearer";

/// The caller of a protected endpoint.
///
/// Holds the verified user when the server has an identity client, `None`
/// when it runs without a verification key.
#[derive(Debug)]
pub struct Caller(pub Option<User>);

impl Caller {
    /// Identifier for logs.
    #[must_use]
    pub fn describe(&self) -> &str {
        self.0.as_ref().map_or("anonymous", |user| user.uid.as_str())
    }
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(identity) = &state.identity else {
            return Ok(Self(None));
        };

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;

        let user = identity.verify(token).map_err(|e| {
            tracing::debug!("rejected ID token: {e}");
            ApiError::Unauthorized(e.to_string())
        })?;
        Ok(Self(Some(user)))
    }
}

/// The credentials of a `Bearer` authorization header. The scheme is matched
/// case-insensitively.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim_start().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case(BEARER_SCHEME) && !token.is_empty()).then_some(token)
}
