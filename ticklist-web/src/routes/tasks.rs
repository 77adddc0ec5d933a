/// Task list endpoints
///
/// This module provides the signed-in half of the site:
///
/// - `GET /` - Render the user's task list
/// - `POST /add_task` - Append a task and return to the list
///
/// Both routes require a resolved identity. Anonymous requests are
/// redirected to `/login` instead of faulting or serving someone else's
/// data.
use crate::{app::AppState, error::WebResult, views};
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;
use ticklist_shared::auth::session::Identity;
use ticklist_shared::models::task::{CreateTask, Task};

/// Task submission form body
///
/// An omitted key deserializes as an empty description, which the store
/// accepts as given.
#[derive(Debug, Deserialize)]
pub struct AddTaskForm {
    /// Task description, stored as given
    #[serde(default)]
    pub task: String,
}

/// Renders the task list for the signed-in user
///
/// Tasks are re-queried on every request and listed in insertion order.
///
/// # Errors
///
/// A failed list query surfaces as a 500 page
pub async fn home(
    State(state): State<AppState>,
    identity: Option<Extension<Identity>>,
) -> WebResult<Response> {
    let identity = match identity {
        Some(Extension(identity)) => identity,
        None => return Ok(Redirect::to("/login").into_response()),
    };

    let tasks = Task::list_by_user(&state.db, identity.user_id).await?;

    Ok(Html(views::home_page(&identity, &tasks)).into_response())
}

/// Creates a task from the home page form
///
/// # Endpoint
///
/// ```text
/// POST /add_task
/// Content-Type: application/x-www-form-urlencoded
///
/// task=buy+milk
/// ```
///
/// The new task starts incomplete and belongs to the signed-in user.
///
/// # Errors
///
/// A failed insert surfaces as a 500 page
pub async fn add_task(
    State(state): State<AppState>,
    identity: Option<Extension<Identity>>,
    Form(form): Form<AddTaskForm>,
) -> WebResult<Response> {
    let identity = match identity {
        Some(Extension(identity)) => identity,
        None => return Ok(Redirect::to("/login").into_response()),
    };

    let task = Task::create(
        &state.db,
        CreateTask {
            user_id: identity.user_id,
            task_desc: form.task,
        },
    )
    .await?;

    tracing::debug!(task_id = task.task_id, user_id = task.user_id, "task added");

    Ok(Redirect::to("/").into_response())
}
