/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use ticklist_web::{app::AppState, config::Config};
/// use ticklist_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig {
///     url: config.database.url.clone(),
///     ..Default::default()
/// })
/// .await?;
/// let state = AppState::new(pool, config);
/// let app = ticklist_web::app::build_router(state);
/// # Ok(())
/// # }
/// ```
use crate::config::Config;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use ticklist_shared::auth::middleware::resolve_session;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// The router is organized as follows:
/// ```text
/// /
/// ├── GET  /             # Task list (anonymous visitors go to /login)
/// ├── GET  /login        # Login form (signed-in users go to /)
/// ├── POST /login        # Verify credentials, set session cookie
/// ├── GET  /register     # Registration form (signed-in users go to /)
/// ├── POST /register     # Create account
/// ├── GET  /logout       # Revoke session, clear cookie
/// ├── POST /add_task     # Append a task to the list
/// └── GET  /health       # Health check (JSON)
/// ```
///
/// # Middleware Stack
///
/// Applied in order (outermost first):
/// 1. Logging (tower-http TraceLayer)
/// 2. Session resolution (every request, including /health; requests are
///    never rejected here, only annotated with an identity)
///
/// # Example
///
/// ```no_run
/// use ticklist_web::app::{AppState, build_router};
/// use ticklist_web::config::Config;
/// use ticklist_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig {
///     url: config.database.url.clone(),
///     ..Default::default()
/// })
/// .await?;
/// let state = AppState::new(pool, config);
///
/// let app = build_router(state);
///
/// // Start server
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
pub fn build_router(state: AppState) -> Router {
    // Import route handlers
    use crate::routes;

    // Health check (public, JSON)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Login/registration/logout; the GET and POST of a path share a route
    let auth_routes = Router::new()
        .route(
            "/login",
            get(routes::auth::login_page).post(routes::auth::login),
        )
        .route(
            "/register",
            get(routes::auth::register_page).post(routes::auth::register),
        )
        .route("/logout", get(routes::auth::logout));

    // Task list and task creation (handlers redirect anonymous visitors)
    let task_routes = Router::new()
        .route("/", get(routes::tasks::home))
        .route("/add_task", post(routes::tasks::add_task));

    // Combine all routes with the middleware stack
    Router::new()
        .merge(health_routes)
        .merge(auth_routes)
        .merge(task_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_layer,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Session resolution middleware layer
///
/// Delegates to the shared resolver, which reads the `authToken` cookie and
/// attaches `Identity` to the request extensions when it maps to a live
/// session. Always passes the request through.
async fn session_layer(State(state): State<AppState>, req: Request, next: Next) -> Response {
    resolve_session(state.db.clone(), req, next).await
}

// The router and state are exercised end-to-end by tests/integration_test.rs,
// which drives every route through the full middleware stack.
