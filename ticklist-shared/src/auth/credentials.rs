/// Credential store: account registration and password verification
///
/// Registration validates its inputs, hashes the password, and inserts the
/// user row; verification looks the user up and checks the password against
/// the stored hash. Both return typed errors whose `Display` strings are the
/// exact messages the forms show.
///
/// The two login failure causes (unknown username, wrong password) are
/// distinct variants but share one message, so the surface cannot be used to
/// probe which usernames exist.
///
/// # Example
///
/// ```no_run
/// use ticklist_shared::auth::credentials;
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
/// credentials::register(&pool, "alice", "hunter2", "hunter2").await?;
///
/// let user = credentials::verify(&pool, "alice", "hunter2").await?;
/// println!("Logged in as user {}", user.user_id);
/// # Ok(())
/// # }
/// ```
use sqlx::SqlitePool;

use super::password::{self, PasswordError};
use crate::models::user::{CreateUser, User};

/// Error type for registration
///
/// The first three variants are user-recoverable and render back into the
/// registration form; the last two are infrastructure failures.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    /// One or more required form fields were empty
    #[error("Fill out all fields to continue registering")]
    FieldsMissing,

    /// Password and confirmation did not match
    #[error("ERROR: ConfirmPassword does not match Password")]
    PasswordMismatch,

    /// Username is already registered
    #[error("That user already exists")]
    UsernameTaken,

    /// Password hashing failed
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Database operation failed
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

/// Error type for login verification
///
/// `NotFound` and `WrongPassword` deliberately share a Display string.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// No user with that username
    #[error("ERROR: username or password is incorrect")]
    NotFound,

    /// Password did not match the stored hash
    #[error("ERROR: username or password is incorrect")]
    WrongPassword,

    /// Stored hash could not be checked
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Database operation failed
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

/// Registers a new user account
///
/// Validation order: presence of all three fields, password/confirmation
/// match, username availability. The availability pre-check is a fast path;
/// under concurrent registration of the same name the `UNIQUE` constraint on
/// `users.username` is the authority, and the losing insert surfaces as
/// [`RegistrationError::UsernameTaken`] too.
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `username` - Requested login name
/// * `password` - Plaintext password (hashed before storage)
/// * `confirm_password` - Second entry of the password
///
/// # Returns
///
/// The newly created user
///
/// # Errors
///
/// See [`RegistrationError`]
pub async fn register(
    pool: &SqlitePool,
    username: &str,
    password: &str,
    confirm_password: &str,
) -> Result<User, RegistrationError> {
    if username.is_empty() || password.is_empty() || confirm_password.is_empty() {
        return Err(RegistrationError::FieldsMissing);
    }

    if password != confirm_password {
        return Err(RegistrationError::PasswordMismatch);
    }

    if User::find_by_username(pool, username).await?.is_some() {
        return Err(RegistrationError::UsernameTaken);
    }

    let password_hash = password::hash_password(password)?;

    let user = User::create(
        pool,
        CreateUser {
            username: username.to_string(),
            password_hash,
        },
    )
    .await
    .map_err(|e| match e {
        // Race loser: someone registered the name between check and insert
        sqlx::Error::Database(ref db)
            if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
        {
            RegistrationError::UsernameTaken
        }
        e => RegistrationError::Storage(e),
    })?;

    tracing::info!(user_id = user.user_id, "registered new user");

    Ok(user)
}

/// Verifies a username/password pair
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `username` - Login name
/// * `password` - Plaintext password to check
///
/// # Returns
///
/// The matching user on success
///
/// # Errors
///
/// [`LoginError::NotFound`] if the username is unknown,
/// [`LoginError::WrongPassword`] if the password does not match
pub async fn verify(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<User, LoginError> {
    let user = match User::find_by_username(pool, username).await? {
        Some(user) => user,
        None => return Err(LoginError::NotFound),
    };

    if !password::verify_password(password, &user.password_hash)? {
        return Err(LoginError::WrongPassword);
    }

    Ok(user)
}
