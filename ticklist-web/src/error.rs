/// Error handling for the web server
///
/// This module provides the error type handlers return for infrastructure
/// failures. User-recoverable form errors (bad credentials, missing fields,
/// duplicate username) never reach this type; handlers turn those into a
/// re-rendered form with a message. Anything that does reach it renders as a
/// generic 500 page with the cause logged server-side only.
///
/// # Example
///
/// ```no_run
/// use ticklist_web::error::WebResult;
/// use axum::response::Html;
///
/// async fn handler() -> WebResult<Html<String>> {
///     // Store calls that fail convert into WebError and render as a 500
///     Ok(Html("<h1>ok</h1>".to_string()))
/// }
/// ```
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::fmt;
use ticklist_shared::auth::password::PasswordError;

use crate::views;

/// Web result type alias
pub type WebResult<T> = Result<T, WebError>;

/// Unified infrastructure error type
///
/// Every variant maps to a 500 response; the distinction exists for logging.
#[derive(Debug)]
pub enum WebError {
    /// Database operation failed
    Database(sqlx::Error),

    /// Password hashing or verification failed
    Password(PasswordError),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebError::Database(e) => write!(f, "Database error: {}", e),
            WebError::Password(e) => write!(f, "Password error: {}", e),
        }
    }
}

impl std::error::Error for WebError {}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        // Log the cause but never expose details to the client
        tracing::error!("Request failed: {}", self);

        (StatusCode::INTERNAL_SERVER_ERROR, Html(views::error_page())).into_response()
    }
}

/// Convert sqlx errors to web errors
impl From<sqlx::Error> for WebError {
    fn from(err: sqlx::Error) -> Self {
        WebError::Database(err)
    }
}

/// Convert password errors to web errors
impl From<PasswordError> for WebError {
    fn from(err: PasswordError) -> Self {
        WebError::Password(err)
    }
}
