/// Integration tests for the TickList web server
///
/// These tests drive the full system end-to-end through the router:
/// - Registration, login, and logout flows with their form error messages
/// - Session cookies (issue on login, clear on logout, stale tokens)
/// - Task creation and listing, including per-user scoping
/// - Redirects guarding the signed-in pages
/// - Health check
mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::TestContext;
use ticklist_shared::models::auth_token::AuthToken;
use ticklist_shared::models::user::User;
use tower::Service as _;

/// Register, log in, and build up a task list
#[tokio::test]
async fn test_register_login_and_add_tasks() {
    let ctx = TestContext::new().await.unwrap();

    common::register_user(&ctx, "alice", "pw123").await;
    let token = common::login_user(&ctx, "alice", "pw123").await;

    // A fresh account has no tasks
    let response = ctx
        .app
        .clone()
        .call(common::get_with_cookie("/", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page = common::body_string(response).await;
    assert!(page.contains("No tasks yet."));
    assert!(page.contains("alice"));

    // Add two tasks
    let response = ctx
        .app
        .clone()
        .call(common::form_post_with_cookie("/add_task", &token, "task=buy+milk"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/");

    let response = ctx
        .app
        .clone()
        .call(common::form_post_with_cookie("/add_task", &token, "task=walk+the+dog"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // The list shows both, oldest first
    let response = ctx
        .app
        .clone()
        .call(common::get_with_cookie("/", &token))
        .await
        .unwrap();
    let page = common::body_string(response).await;

    let first = page.find("buy milk").expect("first task missing");
    let second = page.find("walk the dog").expect("second task missing");
    assert!(first < second);

    // Fresh tasks render as open, not done
    assert!(page.contains(r#"class="open""#));
    assert!(!page.contains(r#"class="done""#));

    ctx.db.close().await;
}

/// Wrong password re-renders the login form with the generic message
#[tokio::test]
async fn test_login_with_wrong_password() {
    let ctx = TestContext::new().await.unwrap();

    common::register_user(&ctx, "alice", "pw123").await;

    let response = ctx
        .app
        .clone()
        .call(common::form_post("/login", "username=alice&password=wrongpw"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let page = common::body_string(response).await;
    assert!(page.contains("ERROR: username or password is incorrect"));

    ctx.db.close().await;
}

/// Unknown username produces the same message as a wrong password
#[tokio::test]
async fn test_login_with_unknown_username() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .app
        .clone()
        .call(common::form_post("/login", "username=nobody&password=pw123"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let page = common::body_string(response).await;
    assert!(page.contains("ERROR: username or password is incorrect"));

    ctx.db.close().await;
}

/// Anonymous visits to the task list are sent to the login page
#[tokio::test]
async fn test_home_redirects_anonymous_visitors() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.app.clone().call(common::get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/login");

    ctx.db.close().await;
}

/// Anonymous task submissions are sent to the login page, storing nothing
#[tokio::test]
async fn test_add_task_redirects_anonymous_visitors() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .app
        .clone()
        .call(common::form_post("/add_task", "task=sneaky"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/login");

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
        .fetch_one(&ctx.db)
        .await
        .unwrap();
    assert_eq!(count, 0);

    ctx.db.close().await;
}

/// A signed-in user visiting /login or /register goes straight to the list
#[tokio::test]
async fn test_auth_pages_redirect_signed_in_users() {
    let ctx = TestContext::new().await.unwrap();

    common::register_user(&ctx, "alice", "pw123").await;
    let token = common::login_user(&ctx, "alice", "pw123").await;

    for uri in ["/login", "/register"] {
        let response = ctx
            .app
            .clone()
            .call(common::get_with_cookie(uri, &token))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER, "GET {}", uri);
        assert_eq!(common::location(&response), "/");
    }

    ctx.db.close().await;
}

/// Mismatched passwords re-render the form and persist nothing
#[tokio::test]
async fn test_register_with_mismatched_passwords() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .app
        .clone()
        .call(common::form_post(
            "/register",
            "username=alice&password=pw123&confirmPassword=pw456",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let page = common::body_string(response).await;
    assert!(page.contains("ERROR: ConfirmPassword does not match Password"));

    assert_eq!(User::count(&ctx.db).await.unwrap(), 0);

    ctx.db.close().await;
}

/// An empty form field re-renders the form and persists nothing
#[tokio::test]
async fn test_register_with_empty_field() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .app
        .clone()
        .call(common::form_post(
            "/register",
            "username=&password=pw123&confirmPassword=pw123",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let page = common::body_string(response).await;
    assert!(page.contains("Fill out all fields to continue registering"));

    assert_eq!(User::count(&ctx.db).await.unwrap(), 0);

    ctx.db.close().await;
}

/// Re-registering a taken username re-renders the form; one row remains
#[tokio::test]
async fn test_register_with_taken_username() {
    let ctx = TestContext::new().await.unwrap();

    common::register_user(&ctx, "alice", "pw123").await;

    let response = ctx
        .app
        .clone()
        .call(common::form_post(
            "/register",
            "username=alice&password=other&confirmPassword=other",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let page = common::body_string(response).await;
    assert!(page.contains("That user already exists"));

    assert_eq!(User::count(&ctx.db).await.unwrap(), 1);

    ctx.db.close().await;
}

/// Logout deletes the token, clears the cookie, and redirects to /login
#[tokio::test]
async fn test_logout_ends_the_session() {
    let ctx = TestContext::new().await.unwrap();

    common::register_user(&ctx, "alice", "pw123").await;
    let token = common::login_user(&ctx, "alice", "pw123").await;

    let response = ctx
        .app
        .clone()
        .call(common::get_with_cookie("/logout", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/login");

    // The clearing cookie has an empty token value
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(set_cookie.starts_with("authToken=;"));
    assert!(set_cookie.contains("Max-Age=0"));

    // The token row is gone, so the old cookie now resolves anonymous
    let user = User::find_by_username(&ctx.db, "alice").await.unwrap().unwrap();
    assert_eq!(AuthToken::count_by_user(&ctx.db, user.user_id).await.unwrap(), 0);

    let response = ctx
        .app
        .clone()
        .call(common::get_with_cookie("/", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/login");

    ctx.db.close().await;
}

/// Logging out twice, or without a cookie at all, behaves the same
#[tokio::test]
async fn test_logout_is_idempotent() {
    let ctx = TestContext::new().await.unwrap();

    common::register_user(&ctx, "alice", "pw123").await;
    let token = common::login_user(&ctx, "alice", "pw123").await;

    for _ in 0..2 {
        let response = ctx
            .app
            .clone()
            .call(common::get_with_cookie("/logout", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(common::location(&response), "/login");
    }

    // No cookie at all still clears and redirects
    let response = ctx.app.clone().call(common::get("/logout")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/login");
    assert!(response.headers().get(header::SET_COOKIE).is_some());

    ctx.db.close().await;
}

/// A cookie with a token that was never issued resolves anonymous
#[tokio::test]
async fn test_stale_cookie_resolves_anonymous() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .app
        .clone()
        .call(common::get_with_cookie("/", "not-a-real-token"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/login");

    ctx.db.close().await;
}

/// Each user sees only their own tasks
#[tokio::test]
async fn test_tasks_are_scoped_to_their_owner() {
    let ctx = TestContext::new().await.unwrap();

    common::register_user(&ctx, "alice", "pw123").await;
    common::register_user(&ctx, "bob", "pw456").await;

    let alice_token = common::login_user(&ctx, "alice", "pw123").await;
    let bob_token = common::login_user(&ctx, "bob", "pw456").await;

    let response = ctx
        .app
        .clone()
        .call(common::form_post_with_cookie(
            "/add_task",
            &alice_token,
            "task=alice+secret",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = ctx
        .app
        .clone()
        .call(common::get_with_cookie("/", &bob_token))
        .await
        .unwrap();
    let page = common::body_string(response).await;

    assert!(!page.contains("alice secret"));
    assert!(page.contains("No tasks yet."));

    ctx.db.close().await;
}

/// Two concurrent logins hold two live sessions for the same account
#[tokio::test]
async fn test_multiple_sessions_coexist() {
    let ctx = TestContext::new().await.unwrap();

    common::register_user(&ctx, "alice", "pw123").await;
    let first = common::login_user(&ctx, "alice", "pw123").await;
    let second = common::login_user(&ctx, "alice", "pw123").await;

    assert_ne!(first, second);

    // Revoking one leaves the other alive
    let response = ctx
        .app
        .clone()
        .call(common::get_with_cookie("/logout", &first))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = ctx
        .app
        .clone()
        .call(common::get_with_cookie("/", &second))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    ctx.db.close().await;
}

/// Health check reports a healthy service and connected database
#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new().await.unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_string(response).await;
    let health: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(health["status"], "healthy");
    assert_eq!(health["database"], "connected");
    assert!(health["version"].is_string());

    ctx.db.close().await;
}

/// A login post that omits a key entirely gets the same generic message
#[tokio::test]
async fn test_login_with_absent_field() {
    let ctx = TestContext::new().await.unwrap();

    common::register_user(&ctx, "alice", "pw123").await;

    // No password key at all, as a hand-built client might send
    let response = ctx
        .app
        .clone()
        .call(common::form_post("/login", "username=alice"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let page = common::body_string(response).await;
    assert!(page.contains("ERROR: username or password is incorrect"));

    ctx.db.close().await;
}

/// A registration post that omits a key re-renders with the message
#[tokio::test]
async fn test_register_with_absent_field() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .app
        .clone()
        .call(common::form_post("/register", "username=alice&password=pw123"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let page = common::body_string(response).await;
    assert!(page.contains("Fill out all fields to continue registering"));

    let count = User::count(&ctx.db).await.unwrap();
    assert_eq!(count, 0, "No user row may be persisted");

    ctx.db.close().await;
}

/// A task post without the task key stores an empty description
#[tokio::test]
async fn test_add_task_with_absent_field() {
    let ctx = TestContext::new().await.unwrap();

    common::register_user(&ctx, "alice", "pw123").await;
    let token = common::login_user(&ctx, "alice", "pw123").await;

    let response = ctx
        .app
        .clone()
        .call(common::form_post_with_cookie("/add_task", &token, ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/");

    let (desc,): (String,) = sqlx::query_as("SELECT task_desc FROM tasks")
        .fetch_one(&ctx.db)
        .await
        .unwrap();
    assert_eq!(desc, "");

    ctx.db.close().await;
}
