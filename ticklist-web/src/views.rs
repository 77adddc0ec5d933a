/// HTML rendering for the site's pages
///
/// The pages are small enough to render with plain string formatting; no
/// template engine is involved. Every user-supplied value passes through
/// [`escape_html`] on the way out, so a task description like `<b>x</b>`
/// displays as text instead of markup.
///
/// Pages:
///
/// - `login_page`: login form, with an optional error line
/// - `register_page`: registration form, with an optional error line
/// - `home_page`: the signed-in user's task list plus the add-task form
/// - `error_page`: generic failure page for 500 responses
use ticklist_shared::auth::session::Identity;
use ticklist_shared::models::task::Task;

/// Escapes text for interpolation into HTML
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }

    escaped
}

/// Wraps page content in the shared HTML shell
fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} | TickList</title>
</head>
<body>
{body}
</body>
</html>
"#
    )
}

/// Renders the error line shown above a form, or nothing
fn error_line(error: Option<&str>) -> String {
    match error {
        Some(message) => format!("<p class=\"error\">{}</p>\n", escape_html(message)),
        None => String::new(),
    }
}

/// Renders the login form
///
/// `error` is the message from a failed attempt; the form re-renders with it
/// after a bad username or password.
pub fn login_page(error: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Log in</h1>
{error}<form method="post" action="/login">
  <label>Username <input type="text" name="username"></label>
  <label>Password <input type="password" name="password"></label>
  <button type="submit">Log in</button>
</form>
<p>New here? <a href="/register">Create an account</a></p>"#,
        error = error_line(error),
    );

    layout("Log in", &body)
}

/// Renders the registration form
pub fn register_page(error: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Register</h1>
{error}<form method="post" action="/register">
  <label>Username <input type="text" name="username"></label>
  <label>Password <input type="password" name="password"></label>
  <label>Confirm password <input type="password" name="confirmPassword"></label>
  <button type="submit">Register</button>
</form>
<p>Already registered? <a href="/login">Log in</a></p>"#,
        error = error_line(error),
    );

    layout("Register", &body)
}

/// Renders the task list for a signed-in user
///
/// Tasks appear in the order given, which the store guarantees is insertion
/// order. Completed tasks get the `done` class so a stylesheet can strike
/// them through once completion ships.
pub fn home_page(identity: &Identity, tasks: &[Task]) -> String {
    let list = if tasks.is_empty() {
        "<p>No tasks yet.</p>".to_string()
    } else {
        let mut items = String::new();
        for task in tasks {
            let class = if task.is_complete { "done" } else { "open" };
            items.push_str(&format!(
                "  <li class=\"{}\">{}</li>\n",
                class,
                escape_html(&task.task_desc),
            ));
        }

        format!("<ul>\n{}</ul>", items)
    };

    let body = format!(
        r#"<h1>{username}'s tasks</h1>
{list}
<form method="post" action="/add_task">
  <label>New task <input type="text" name="task"></label>
  <button type="submit">Add</button>
</form>
<p><a href="/logout">Log out</a></p>"#,
        username = escape_html(&identity.username),
        list = list,
    );

    layout("Tasks", &body)
}

/// Renders the generic failure page used for 500 responses
pub fn error_page() -> String {
    layout(
        "Something went wrong",
        "<h1>Something went wrong</h1>\n<p>The request could not be completed. Please try again.</p>",
    )
}
