/// Authentication endpoints
///
/// This module provides the login, registration, and logout flows:
///
/// - `GET /login` / `GET /register` - Render the forms (signed-in users are
///   sent back to `/`)
/// - `POST /login` - Verify credentials, issue a session token, set the
///   `authToken` cookie, redirect to `/`
/// - `POST /register` - Create the account, redirect to `/login`
/// - `GET /logout` - Revoke the session token, clear the cookie, redirect
///   to `/login`
///
/// Failed logins and invalid registrations re-render their form with a
/// message; only infrastructure failures become 500s.
use crate::{
    app::AppState,
    error::{WebError, WebResult},
    views,
};
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;
use ticklist_shared::auth::{
    credentials::{self, LoginError, RegistrationError},
    middleware, session,
    session::Identity,
};

/// Login form body
///
/// Omitted keys deserialize as empty strings rather than rejecting the
/// request, so a doctored post gets the same answer as an empty field.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Login name
    #[serde(default)]
    pub username: String,

    /// Plaintext password
    #[serde(default)]
    pub password: String,
}

/// Registration form body
///
/// Omitted keys deserialize as empty strings; presence is checked in the
/// credential store, which owns the missing-fields message.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    /// Requested login name
    #[serde(default)]
    pub username: String,

    /// Plaintext password
    #[serde(default)]
    pub password: String,

    /// Second entry of the password
    #[serde(rename = "confirmPassword", default)]
    pub confirm_password: String,
}

/// Renders the login form
///
/// A signed-in user has nothing to do here and is redirected to `/`.
pub async fn login_page(identity: Option<Extension<Identity>>) -> Response {
    if identity.is_some() {
        return Redirect::to("/").into_response();
    }

    Html(views::login_page(None)).into_response()
}

/// Renders the registration form
///
/// A signed-in user has nothing to do here and is redirected to `/`.
pub async fn register_page(identity: Option<Extension<Identity>>) -> Response {
    if identity.is_some() {
        return Redirect::to("/").into_response();
    }

    Html(views::register_page(None)).into_response()
}

/// Login handler
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/x-www-form-urlencoded
///
/// username=alice&password=hunter2
/// ```
///
/// On success: issues a session token, sets the `authToken` cookie, and
/// redirects to `/`. Unknown username and wrong password both re-render the
/// form with the same message, so the response does not reveal which part
/// was wrong.
///
/// # Errors
///
/// Storage and hashing failures surface as a 500 page
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> WebResult<Response> {
    match credentials::verify(&state.db, &form.username, &form.password).await {
        Ok(user) => {
            let token = session::issue(&state.db, user.user_id).await?;

            Ok(redirect_with_cookie("/", &middleware::session_cookie(&token)))
        }
        Err(e @ (LoginError::NotFound | LoginError::WrongPassword)) => {
            Ok(Html(views::login_page(Some(&e.to_string()))).into_response())
        }
        Err(LoginError::Password(e)) => Err(WebError::Password(e)),
        Err(LoginError::Storage(e)) => Err(WebError::Database(e)),
    }
}

/// Registration handler
///
/// # Endpoint
///
/// ```text
/// POST /register
/// Content-Type: application/x-www-form-urlencoded
///
/// username=alice&password=hunter2&confirmPassword=hunter2
/// ```
///
/// On success the new user is sent to `/login` to sign in. Empty fields, a
/// password mismatch, and a taken username each re-render the form with
/// their message and persist nothing.
///
/// # Errors
///
/// Storage and hashing failures surface as a 500 page
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> WebResult<Response> {
    match credentials::register(
        &state.db,
        &form.username,
        &form.password,
        &form.confirm_password,
    )
    .await
    {
        Ok(_) => Ok(Redirect::to("/login").into_response()),
        Err(
            e @ (RegistrationError::FieldsMissing
            | RegistrationError::PasswordMismatch
            | RegistrationError::UsernameTaken),
        ) => Ok(Html(views::register_page(Some(&e.to_string()))).into_response()),
        Err(RegistrationError::Password(e)) => Err(WebError::Password(e)),
        Err(RegistrationError::Storage(e)) => Err(WebError::Database(e)),
    }
}

/// Logout handler
///
/// Revokes the session token named by the cookie, if any. The cookie is
/// cleared and the user redirected to `/login` whether or not a matching
/// token existed, so logging out twice is harmless.
///
/// # Errors
///
/// A failed delete surfaces as a 500 page
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> WebResult<Response> {
    if let Some(token) = middleware::auth_token_from_headers(&headers) {
        session::revoke(&state.db, &token).await?;
    }

    Ok(redirect_with_cookie(
        "/login",
        &middleware::clear_session_cookie(),
    ))
}

/// Builds a redirect response carrying a Set-Cookie header
///
/// Cookie strings come from the session module's formatters and contain only
/// valid header characters.
fn redirect_with_cookie(location: &str, cookie: &str) -> Response {
    let mut response = Redirect::to(location).into_response();
    response
        .headers_mut()
        .insert(header::SET_COOKIE, HeaderValue::from_str(cookie).unwrap());

    response
}
