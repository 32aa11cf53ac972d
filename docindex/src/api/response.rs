//! JSON envelope shared by all API responses, and the API error type.
//!
//! Every body carries `status` (`"success"` or `"fail"`) plus, depending on
//! the endpoint, a `message`, a `document` or a `documents` list. The HTTP
//! status code mirrors the outcome.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::documents::{Document, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
}

#[derive(Debug, Serialize)]
pub struct Envelope {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<Document>>,
}

impl Envelope {
    #[must_use]
    pub fn success() -> Self {
        Self {
            status: Status::Success,
            message: None,
            document: None,
            documents: None,
        }
    }

    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: Status::Fail,
            message: Some(message.into()),
            document: None,
            documents: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_document(mut self, document: Document) -> Self {
        self.document = Some(document);
        self
    }

    #[must_use]
    pub fn with_documents(mut self, documents: Vec<Document>) -> Self {
        self.documents = Some(documents);
        self
    }
}

/// A request that could not be served.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or invalid ID token on a protected endpoint.
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    /// The request body was unusable or broke a field rule.
    Invalid(String),
    /// Details are logged, not returned.
    Internal,
}

impl ApiError {
    const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized(message)
            | Self::NotFound(message)
            | Self::Conflict(message)
            | Self::Invalid(message) => f.write_str(message),
            Self::Internal => f.write_str("internal error"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(e) => Self::Invalid(e.to_string()),
            StoreError::DuplicateIdentifier(_) => Self::Conflict(e.to_string()),
            StoreError::Sqlite(e) => {
                tracing::error!("document store failure: {e}");
                Self::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(Envelope::fail(self.to_string()))).into_response()
    }
}
