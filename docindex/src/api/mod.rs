//! HTTP surface of the server.
//!
//! - `/api/*`: JSON document API. Mutations require a bearer ID token when
//!   a verification key is configured.
//! - `/__/firebase/init.json`: the identity config the browser client boots
//!   with.
//! - Everything else: the client shell page, with 200 for paths the client
//!   router knows and 404 otherwise.

pub mod auth;
pub mod documents;
pub mod response;

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

pub use response::{ApiError, Envelope, Status};

use crate::auth::{AuthConfig, AuthHandle, IdentityClient};
use crate::documents::DocumentStore;
use crate::router::{RouteTableError, View, client_routes};
use crate::shell::{AppShell, IconLibrary, ShellPage};

const API_PREFIX: &str = "/api/";

/// Shared state threaded through the handlers.
#[derive(Clone)]
#[allow(clippy::disallowed_methods)] // Arc::clone is safe and expected for shared state
pub struct AppState {
    pub store: Arc<Mutex<DocumentStore>>,
    pub auth_config: Arc<AuthConfig>,
    /// `None` leaves mutations unauthenticated.
    pub identity: Option<Arc<IdentityClient>>,
    /// Decides which paths are client routes.
    pub shell: Arc<AppShell>,
    pub page: Arc<ShellPage>,
}

impl AppState {
    /// Mounts the client shell over the client routes. Without an identity
    /// client the shell sees a signed-out session.
    ///
    /// # Errors
    /// Returns an error if the client route table is invalid.
    pub fn new(
        store: DocumentStore,
        auth_config: AuthConfig,
        identity: Option<IdentityClient>,
        page: ShellPage,
    ) -> Result<Self, RouteTableError> {
        let auth = identity
            .as_ref()
            .map_or_else(AuthHandle::signed_out, IdentityClient::handle);
        let shell = AppShell::mount(auth, client_routes()?, IconLibrary::with_defaults());
        Ok(Self {
            store: Arc::new(Mutex::new(store)),
            auth_config: Arc::new(auth_config),
            identity: identity.map(Arc::new),
            shell: Arc::new(shell),
            page: Arc::new(page),
        })
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/pong", get(ping))
        .route(
            "/api/documents",
            get(documents::list_documents).post(documents::create_document),
        )
        .route(
            "/api/documents/{doc_identifier}",
            get(documents::get_document)
                .put(documents::update_document)
                .delete(documents::delete_document),
        )
        .route("/__/firebase/init.json", get(client_auth_config))
        .fallback(client_fallback)
        .with_state(state)
}

async fn ping() -> Json<&'static str> {
    tracing::info!("Pong!");
    Json("pong!")
}

async fn client_auth_config(State(state): State<AppState>) -> Response {
    Json(state.auth_config.client_config()).into_response()
}

async fn client_fallback(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let path = uri.path();

    if path.starts_with(API_PREFIX) {
        return ApiError::NotFound("Not found".to_string()).into_response();
    }
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let navigation = state.shell.navigate(path);
    let status = if navigation.view == View::NotFound {
        StatusCode::NOT_FOUND
    } else {
        tracing::debug!("serving client view {} for {path}", navigation.view);
        StatusCode::OK
    };
    (status, Html(state.page.html().to_string())).into_response()
}
