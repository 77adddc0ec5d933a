/// Database models for TickList
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: Registered accounts (username + password hash)
/// - `auth_token`: Server-side session tokens backing the login cookie
/// - `task`: Per-user to-do items
///
/// # Example
///
/// ```no_run
/// use ticklist_shared::models::user::{User, CreateUser};
/// use ticklist_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_user = CreateUser {
///     username: "alice".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```
pub mod auth_token;
pub mod task;
pub mod user;
