/// Route handlers
///
/// This module contains all route handlers organized by concern:
///
/// - `health`: Health check endpoint
/// - `auth`: Login, registration, and logout
/// - `tasks`: Task list page and task creation
pub mod auth;
pub mod health;
pub mod tasks;
