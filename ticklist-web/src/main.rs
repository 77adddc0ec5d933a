//! # TickList Web Server
//!
//! This is the web server for TickList, a minimal personal to-do list.
//! Users register, log in, and keep a list of tasks tied to their account.
//!
//! ## Architecture
//!
//! The server is built with Axum and provides:
//! - HTML pages for login, registration, and the task list
//! - Cookie-based sessions backed by the `authtokens` table
//! - A JSON health check endpoint
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p ticklist-web
//! ```
//!
//! The database file is created on first boot; see `config` for the
//! environment variables.

use ticklist_shared::db::{migrations, pool};
use ticklist_web::{
    app::{build_router, AppState},
    config::Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ticklist_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("TickList v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    // A fresh checkout has no database file yet
    migrations::ensure_database_exists(&config.database.url).await?;

    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    migrations::run_migrations(&db).await?;

    let app = build_router(AppState::new(db.clone(), config.clone()));

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool::close_pool(db).await;
    tracing::info!("Shutdown complete");

    Ok(())
}

/// Resolves when the process receives Ctrl-C
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            // Without a signal handler there is no way to know when to
            // stop; keep serving rather than exiting immediately
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
