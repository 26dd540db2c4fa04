//! HTTP server setup and routing.
pub mod handlers;
pub mod state;

use std::net::SocketAddr;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::info;

use self::state::AppState;
use crate::config::create_cors_layer;
use crate::errors::ServiceError;

/// Create the Axum application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/migrate/contact", post(handlers::migrate_contact))
        .route("/migrate/organisation", post(handlers::migrate_organisation))
        .route(
            "/sync/contact/:id",
            get(handlers::get_contact).delete(handlers::delete_contact),
        )
        .route(
            "/sync/organisation/:id",
            get(handlers::get_organisation).delete(handlers::delete_organisation),
        )
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(state)
}

/// Run the server on the specified address until ctrl-c.
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), ServiceError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
    }
}
