//! Quill Notes API
//!
//! Note-storage backend with JWT authentication.
//!
//! ## REST Endpoints
//!
//! - `POST /auth/register` - Create an account
//! - `POST /auth/login` - Exchange credentials for a token pair
//! - `POST /auth/refresh` - Rotate a refresh token (single use)
//! - `POST /notes` - Create or update a note
//! - `GET /notes` - List the caller's notes
//! - `DELETE /notes/{id}` - Delete a note
//!
//! ## Health Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe

mod config;
mod error;
mod extractors;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::{delete, get, post};
use axum::Router;
use quill_auth_core::AuthService;
use quill_db::pg::{PgRefreshTokenRepository, Repositories};
use quill_db::RefreshTokenRepository;
use tokio::signal;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::handlers::{
    delete_note, health, list_notes, login, ready, refresh, register, save_note,
};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("notes_api=debug".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Quill Notes API");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(http_port = config.http_port, "Configuration loaded");

    // Create database pool
    let pool = quill_db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    // Create repositories
    let repos = Repositories::new(pool.clone());

    // Create auth service
    let auth = AuthService::new(
        &config.auth,
        Arc::new(repos.users.clone()),
        Arc::new(repos.refresh_tokens.clone()),
    );

    let purge_interval = config.purge_interval;

    // Create application state
    let state = AppState::new(auth, repos, pool);

    // Background purge of expired refresh tokens
    spawn_token_purge(state.repos.refresh_tokens.clone(), purge_interval);

    // Build HTTP router
    let app = build_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    tracing::info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn build_router(state: AppState) -> Router {
    // Auth routes (unauthenticated)
    let auth_routes = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh));

    // Note routes (require an access token)
    let note_routes = Router::new()
        .route("/notes", post(save_note).get(list_notes))
        .route("/notes/{id}", delete(delete_note));

    // Health routes
    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready));

    Router::new()
        .merge(auth_routes)
        .merge(note_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .merge(health_routes) // Health routes outside the trace layer
        .with_state(state)
}

/// Periodically delete expired refresh tokens so the table does not grow
/// without bound. Expired rows are already invisible to lookups, so the
/// purge cadence only affects storage.
fn spawn_token_purge(repo: PgRefreshTokenRepository, interval: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            match repo.delete_expired().await {
                Ok(0) => {}
                Ok(n) => tracing::info!(count = n, "Purged expired refresh tokens"),
                Err(e) => tracing::warn!(error = %e, "Refresh token purge failed"),
            }
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
