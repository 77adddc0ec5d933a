/// Task model and database operations
///
/// This module provides the Task model representing a single to-do item on a
/// user's list. A task is created with `is_complete = false` and the surface
/// exposes no completion or deletion operation yet; the lifecycle is planned
/// as created → completed → deleted, and the flag exists in storage so the
/// list view can render state once those transitions ship.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     task_id INTEGER PRIMARY KEY AUTOINCREMENT,
///     user_id INTEGER NOT NULL REFERENCES users(user_id),
///     task_desc TEXT NOT NULL,
///     is_complete BOOLEAN NOT NULL DEFAULT FALSE
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use ticklist_shared::models::task::{Task, CreateTask};
/// use ticklist_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     user_id: 1,
///     task_desc: "buy milk".to_string(),
/// }).await?;
///
/// // List the user's tasks, oldest first
/// let tasks = Task::list_by_user(&pool, task.user_id).await?;
/// # Ok(())
/// # }
/// ```
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Task model representing one to-do item
///
/// A task belongs to exactly one user and is never shared.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID (auto-incrementing row id)
    pub task_id: i64,

    /// User this task belongs to
    pub user_id: i64,

    /// Free-form task description
    pub task_desc: String,

    /// Whether the task has been completed
    ///
    /// Always false at creation; no operation flips it yet
    pub is_complete: bool,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Owning user ID
    pub user_id: i64,

    /// Task description (stored as given, no length or content checks)
    pub task_desc: String,
}

impl Task {
    /// Creates a new task in the not-complete state
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `data` - Task creation data
    ///
    /// # Returns
    ///
    /// The newly created task
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create(pool: &SqlitePool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, task_desc, is_complete)
            VALUES (?, ?, FALSE)
            RETURNING task_id, user_id, task_desc, is_complete
            "#,
        )
        .bind(data.user_id)
        .bind(data.task_desc)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks belonging to a user, in insertion order
    pub async fn list_by_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT task_id, user_id, task_desc, is_complete
            FROM tasks
            WHERE user_id = ?
            ORDER BY task_id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Counts tasks belonging to a user
    pub async fn count_by_user(pool: &SqlitePool, user_id: i64) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
