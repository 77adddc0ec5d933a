/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Fresh in-memory test database per context
/// - App construction with the full middleware stack
/// - Request builders for form posts and cookie-carrying GETs
/// - Register/login helpers that drive the real HTTP surface
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use sqlx::SqlitePool;
use ticklist_shared::db::migrations::run_migrations;
use ticklist_shared::db::pool::{create_pool, DatabaseConfig};
use ticklist_web::app::{build_router, AppState};
use ticklist_web::config::{ApiConfig, Config, DatabaseConfig as WebDatabaseConfig};
use tower::Service as _;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context with a fresh in-memory database
    pub async fn new() -> anyhow::Result<Self> {
        // In-memory SQLite must stay on a single connection; every
        // connection opens its own empty database
        let db = create_pool(DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            idle_timeout_seconds: None,
            max_lifetime_seconds: None,
            ..Default::default()
        })
        .await?;

        run_migrations(&db).await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: WebDatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
        };

        let app = build_router(AppState::new(db.clone(), config));

        Ok(TestContext { db, app })
    }
}

/// Builds a form POST request
pub fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Builds a form POST request carrying a session cookie
pub fn form_post_with_cookie(uri: &str, token: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .header("cookie", format!("authToken={}", token))
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Builds a GET request
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Builds a GET request carrying a session cookie
pub fn get_with_cookie(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("cookie", format!("authToken={}", token))
        .body(Body::empty())
        .unwrap()
}

/// Registers a user through the registration endpoint
pub async fn register_user(ctx: &TestContext, username: &str, password: &str) {
    let body = format!(
        "username={}&password={}&confirmPassword={}",
        username, password, password
    );

    let response = ctx
        .app
        .clone()
        .call(form_post("/register", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

/// Logs a user in through the login endpoint and returns the session token
pub async fn login_user(ctx: &TestContext, username: &str, password: &str) -> String {
    let body = format!("username={}&password={}", username, password);

    let response = ctx
        .app
        .clone()
        .call(form_post("/login", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    session_token(&response).expect("login did not set a session cookie")
}

/// Extracts the session token from a response's Set-Cookie header
///
/// Returns None when no cookie was set, or when the cookie clears the token
/// (empty value).
pub fn session_token(response: &Response<Body>) -> Option<String> {
    let set_cookie = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    let (name, token) = set_cookie.split(';').next()?.split_once('=')?;

    if name == "authToken" && !token.is_empty() {
        Some(token.to_string())
    } else {
        None
    }
}

/// Reads a response body into a string
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Returns a response's Location header
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("response has no Location header")
        .to_str()
        .unwrap()
}
