/// Session token model and database operations
///
/// One row per live login session. The token string itself is the primary
/// key; it is opaque to the client and carries no expiry. A user may hold
/// several tokens at once (one per login).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE authtokens (
///     token TEXT PRIMARY KEY,
///     user_id INTEGER NOT NULL REFERENCES users(user_id)
/// );
/// ```
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// A stored session token bound to a user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuthToken {
    /// Opaque token value presented by the client cookie
    pub token: String,

    /// User this session belongs to
    pub user_id: i64,
}

impl AuthToken {
    /// Inserts a new session token row
    ///
    /// # Errors
    ///
    /// Returns an error if the token already exists or the database
    /// operation fails
    pub async fn create(
        pool: &SqlitePool,
        token: &str,
        user_id: i64,
    ) -> Result<Self, sqlx::Error> {
        let auth_token = sqlx::query_as::<_, AuthToken>(
            r#"
            INSERT INTO authtokens (token, user_id)
            VALUES (?, ?)
            RETURNING token, user_id
            "#,
        )
        .bind(token)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(auth_token)
    }

    /// Finds a session token row by its token value
    pub async fn find_by_token(
        pool: &SqlitePool,
        token: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let auth_token = sqlx::query_as::<_, AuthToken>(
            r#"
            SELECT token, user_id
            FROM authtokens
            WHERE token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(pool)
        .await?;

        Ok(auth_token)
    }

    /// Deletes a session token row
    ///
    /// # Returns
    ///
    /// True if a row was deleted, false if the token didn't exist
    pub async fn delete(pool: &SqlitePool, token: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM authtokens WHERE token = ?")
            .bind(token)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts live sessions for a user
    pub async fn count_by_user(pool: &SqlitePool, user_id: i64) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM authtokens WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
