/// Session token issuing, revocation, and resolution
///
/// Login mints an opaque token (UUID v4), stores it in the `authtokens`
/// table, and hands it to the client as a cookie value. Every later request
/// resolves the cookie back to an [`Identity`] through this module. Tokens
/// carry no expiry; they live until the user logs out.
///
/// # Example
///
/// ```no_run
/// use ticklist_shared::auth::session;
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool, user_id: i64) -> Result<(), sqlx::Error> {
/// // Mint a token at login
/// let token = session::issue(&pool, user_id).await?;
///
/// // Resolve it on a later request
/// if let Some(identity) = session::resolve(&pool, &token).await? {
///     println!("Request from {}", identity.username);
/// }
///
/// // Revoke at logout; revoking again is a no-op
/// session::revoke(&pool, &token).await?;
/// session::revoke(&pool, &token).await?;
/// # Ok(())
/// # }
/// ```
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::auth_token::AuthToken;
use crate::models::user::User;

/// Resolved requester identity
///
/// Built from a valid session token; attached to request extensions by the
/// resolver middleware. Handlers extract it as `Option<Extension<Identity>>`
/// and treat `None` as an anonymous visitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Authenticated user ID
    pub user_id: i64,

    /// Login name, for display
    pub username: String,
}

impl Identity {
    /// Builds an identity from a user row
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username.clone(),
        }
    }
}

/// Issues a new session token for a user
///
/// Generates a random opaque identifier and persists it. The returned string
/// is what the client carries in its session cookie.
///
/// # Errors
///
/// Returns an error if the insert fails
pub async fn issue(pool: &SqlitePool, user_id: i64) -> Result<String, sqlx::Error> {
    let token = Uuid::new_v4().to_string();
    AuthToken::create(pool, &token, user_id).await?;

    tracing::debug!(user_id, "issued session token");
    Ok(token)
}

/// Revokes a session token
///
/// Deleting a token that does not exist is a silent no-op, so logout can run
/// unconditionally.
///
/// # Errors
///
/// Returns an error only if the delete itself fails
pub async fn revoke(pool: &SqlitePool, token: &str) -> Result<(), sqlx::Error> {
    let deleted = AuthToken::delete(pool, token).await?;
    if deleted {
        tracing::debug!("revoked session token");
    }

    Ok(())
}

/// Resolves a session token to the identity that issued it
///
/// Returns `None` for an unknown token, or for a token whose user row no
/// longer exists.
///
/// # Errors
///
/// Returns an error if a lookup fails
pub async fn resolve(pool: &SqlitePool, token: &str) -> Result<Option<Identity>, sqlx::Error> {
    let auth_token = match AuthToken::find_by_token(pool, token).await? {
        Some(auth_token) => auth_token,
        None => return Ok(None),
    };

    let user = match User::find_by_id(pool, auth_token.user_id).await? {
        Some(user) => user,
        None => return Ok(None),
    };

    Ok(Some(Identity::from_user(&user)))
}
