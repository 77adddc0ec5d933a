/// Authentication utilities
///
/// This module provides the authentication primitives for TickList:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`credentials`]: Account registration and login verification
/// - [`session`]: Opaque session token issue, resolve, and revoke
/// - [`middleware`]: Axum layer resolving the session cookie to an identity
///
/// # Example
///
/// ```no_run
/// use ticklist_shared::auth::{credentials, session};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
/// // Register, then log in
/// credentials::register(&pool, "alice", "hunter2", "hunter2").await?;
/// let user = credentials::verify(&pool, "alice", "hunter2").await?;
///
/// // Mint the session token the cookie will carry
/// let token = session::issue(&pool, user.user_id).await?;
/// # Ok(())
/// # }
/// ```
pub mod credentials;
pub mod middleware;
pub mod password;
pub mod session;
