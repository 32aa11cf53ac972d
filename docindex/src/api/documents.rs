//! Handlers for `/api/documents`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use super::auth::Caller;
use super::{ApiError, AppState, Envelope};
use crate::documents::{DocumentPatch, DocumentStore, NewDocument};

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::Invalid(rejection.body_text()))
}

fn lock_store(state: &AppState) -> Result<std::sync::MutexGuard<'_, DocumentStore>, ApiError> {
    state.store.lock().map_err(|_| {
        tracing::error!("document store lock poisoned");
        ApiError::Internal
    })
}

pub async fn list_documents(State(state): State<AppState>) -> Result<Json<Envelope>, ApiError> {
    tracing::info!("listing all documents");
    let documents = lock_store(&state)?.list()?;
    Ok(Json(Envelope::success().with_documents(documents)))
}

pub async fn create_document(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<NewDocument>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope>), ApiError> {
    let new = body(payload)?;
    tracing::info!("{} is adding document {}", caller.describe(), new.doc_identifier);

    let document = lock_store(&state)?.create(new)?;
    Ok((
        StatusCode::CREATED,
        Json(
            Envelope::success()
                .with_message("Document added!")
                .with_document(document),
        ),
    ))
}

pub async fn get_document(
    State(state): State<AppState>,
    Path(doc_identifier): Path<String>,
) -> Result<Json<Envelope>, ApiError> {
    tracing::info!("viewing document {doc_identifier}");
    match lock_store(&state)?.get_by_identifier(&doc_identifier)? {
        Some(document) => Ok(Json(Envelope::success().with_document(document))),
        None => Err(ApiError::NotFound("No document found.".to_string())),
    }
}

pub async fn update_document(
    State(state): State<AppState>,
    Path(doc_identifier): Path<String>,
    caller: Caller,
    payload: Result<Json<DocumentPatch>, JsonRejection>,
) -> Result<Json<Envelope>, ApiError> {
    let patch = body(payload)?;
    tracing::info!("{} is updating document {doc_identifier}", caller.describe());

    match lock_store(&state)?.update(&doc_identifier, patch)? {
        Some(document) => Ok(Json(
            Envelope::success()
                .with_message("Document updated!")
                .with_document(document),
        )),
        None => Err(ApiError::NotFound("Document not found".to_string())),
    }
}

pub async fn delete_document(
    State(state): State<AppState>,
    Path(doc_identifier): Path<String>,
    caller: Caller,
) -> Result<Json<Envelope>, ApiError> {
    tracing::info!("{} is deleting document {doc_identifier}", caller.describe());

    if lock_store(&state)?.delete_by_identifier(&doc_identifier)? {
        Ok(Json(Envelope::success().with_message("Document removed!")))
    } else {
        Err(ApiError::NotFound("Document not found".to_string()))
    }
}
