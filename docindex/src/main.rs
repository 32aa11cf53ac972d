#![cfg_attr(test, allow(clippy::disallowed_methods))]
// Forbid unwrap() in production code; startup failures are logged and exit.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
use std::net::SocketAddr;

use docindex::auth::IdentityClient;
use docindex::config::ServerConfig;
use docindex::documents::DocumentStore;
use docindex::shell::ShellPage;
use docindex::{AppState, build_router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docindex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment variables
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Loaded configuration: project={}, database_path={}, listen_port={}",
        config.auth.project_id(),
        config.database_path.display(),
        config.listen_port
    );

    let identity = match config.load_verification_key() {
        Ok(Some(key)) => match IdentityClient::initialize(config.auth.clone(), &key) {
            Ok(identity) => {
                // The server keeps no session of its own; requests carry their tokens.
                identity.restore_session(None);
                tracing::info!("Verifying ID tokens with {}", key.algorithm_name());
                Some(identity)
            }
            Err(e) => {
                tracing::error!("Failed to initialize identity client: {e}");
                std::process::exit(1);
            }
        },
        Ok(None) => {
            tracing::warn!("No token key configured; document mutations are unauthenticated");
            None
        }
        Err(e) => {
            tracing::error!("Failed to load token key: {e}");
            std::process::exit(1);
        }
    };

    let store = match DocumentStore::open(&config.database_path) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open document store: {e}");
            std::process::exit(1);
        }
    };
    match store.count() {
        Ok(count) => tracing::info!("Document store holds {count} documents"),
        Err(e) => tracing::warn!("Could not count documents: {e}"),
    }

    let page = match &config.index_html {
        Some(path) => ShellPage::from_file(path).unwrap_or_else(|e| {
            tracing::error!("Failed to read {}: {e}", path.display());
            std::process::exit(1);
        }),
        None => ShellPage::default(),
    };

    let listen_port = config.listen_port;
    let state = match AppState::new(store, config.auth, identity, page) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Invalid client route table: {e}");
            std::process::exit(1);
        }
    };

    let app = build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], listen_port));
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind: {e}");
            std::process::exit(1);
        });

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    });
}
