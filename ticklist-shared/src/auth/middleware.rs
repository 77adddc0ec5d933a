/// Session resolution middleware for Axum
///
/// Runs once per request, before any route logic. It reads the `authToken`
/// cookie, resolves it against the `authtokens` table, and on success adds
/// the resolved [`Identity`](super::session::Identity) to the request
/// extensions. Requests without a cookie, with an unknown token, or hitting
/// a storage fault proceed anonymously; this middleware never rejects a
/// request.
///
/// # Request Extensions
///
/// After resolution, handlers extract the identity with Axum's `Extension`
/// extractor:
///
/// ```
/// use axum::Extension;
/// use ticklist_shared::auth::session::Identity;
///
/// async fn handler(identity: Option<Extension<Identity>>) -> String {
///     match identity {
///         Some(Extension(identity)) => format!("Hello, {}!", identity.username),
///         None => "Hello, anonymous!".to_string(),
///     }
/// }
/// ```
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Router};
/// use sqlx::SqlitePool;
/// use ticklist_shared::auth::middleware::resolve_session;
///
/// fn router(pool: SqlitePool) -> Router {
///     Router::new()
///         .route("/", get(|| async { "OK" }))
///         .layer(middleware::from_fn(move |req, next| {
///             resolve_session(pool.clone(), req, next)
///         }))
/// }
/// ```
use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use sqlx::SqlitePool;

use super::session;

/// Name of the session cookie
pub const AUTH_COOKIE: &str = "authToken";

/// Extracts the session token from a request's Cookie header(s)
///
/// Returns the value of the first `authToken` cookie found, or None.
pub fn auth_token_from_headers(headers: &HeaderMap) -> Option<String> {
    for header_value in headers.get_all(header::COOKIE) {
        let raw = match header_value.to_str() {
            Ok(raw) => raw,
            Err(_) => continue,
        };

        for pair in raw.split(';') {
            if let Some((name, value)) = pair.trim().split_once('=') {
                if name == AUTH_COOKIE {
                    return Some(value.to_string());
                }
            }
        }
    }

    None
}

/// Builds the Set-Cookie value that installs a session token
///
/// The cookie carries no expiry; the session lives until logout.
pub fn session_cookie(token: &str) -> String {
    format!("{}={}; Path=/", AUTH_COOKIE, token)
}

/// Builds the Set-Cookie value that clears the session cookie
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; Max-Age=0", AUTH_COOKIE)
}

/// Session resolution middleware
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `req` - Request
/// * `next` - Next middleware/handler
///
/// # Returns
///
/// The downstream response, with `Identity` added to the request extensions
/// when the cookie resolved to a live session. Resolution failures never
/// fail the request; the request continues without an identity.
pub async fn resolve_session(pool: SqlitePool, mut req: Request, next: Next) -> Response {
    if let Some(token) = auth_token_from_headers(req.headers()) {
        match session::resolve(&pool, &token).await {
            Ok(Some(identity)) => {
                req.extensions_mut().insert(identity);
            }
            Ok(None) => {
                tracing::debug!("session cookie did not match a live token");
            }
            Err(e) => {
                // Storage faults degrade to anonymous; the request proceeds
                tracing::warn!(error = %e, "session resolution failed");
            }
        }
    }

    next.run(req).await
}
