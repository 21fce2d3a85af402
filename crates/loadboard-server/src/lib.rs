//! HTTP surface of the mock load board.
//!
//! # Endpoints
//!
//! - `GET /api/loads/search` - read API mimicking a third-party load board.
//!   Query parameters: `origin`, `destination` (case-insensitive substring),
//!   `equipment` (exact), `status` (exact, default `available`), `limit`
//!   (default 50).
//! - `POST /api/admin/loads` - insert one posting from a JSON body.
//! - `GET /health` - liveness.
//!
//! Every API response is a JSON envelope with a `success` flag. Validation
//! failures answer 400, store failures 500.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=info loadboard serve --port 3000
//! curl 'http://localhost:3000/api/loads/search?origin=chicago&limit=10'
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use loadboard_app::config::Config;
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

pub mod error;
pub mod routes;
pub mod state;
pub mod utils;

use routes::{health_handler, ingest_handler, search_handler};
pub use state::State;

pub fn build_router(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/loads/search", get(search_handler))
        .route("/api/admin/loads", post(ingest_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn start_server(config: Config) -> loadboard_types::Result<()> {
    info!("Initializing state...");
    let state = State::new(config)?;
    info!("Database: {}", state.store.db_path().display());

    let address = state.config.listen_address();
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
