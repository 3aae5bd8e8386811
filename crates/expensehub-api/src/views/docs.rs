//! Public API reference screen.

use axum::response::Html;

use super::layout::page;

const ENDPOINTS: &[(&str, &str, &str, &str)] = &[
    ("GET", "/api/health", "", "Service status, no session needed"),
    ("GET", "/api/health/detailed", "", "Status including the database"),
    ("POST", "/api/auth/sign-up", "{email, password, username}", "Register; returns {message}"),
    ("GET", "/api/auth/confirm?token=", "", "Confirm an e-mail address, then redirect to sign-in"),
    ("POST", "/api/auth/sign-in", "{email, password}", "Returns the profile and sets the session cookie"),
    ("POST", "/api/auth/sign-out", "", "Ends the session"),
    ("GET", "/api/auth/me", "", "Profile of the signed-in user"),
    ("GET", "/api/groups", "", "Your groups, newest first"),
    ("POST", "/api/groups", "{name}", "Create a group"),
    ("PUT", "/api/groups/{id}", "{name}", "Rename a group"),
    ("DELETE", "/api/groups/{id}", "", "Delete a group and its expenses"),
    ("GET", "/api/expenses/{groupId}", "", "Expenses of a group, newest first"),
    ("POST", "/api/expenses/{groupId}", "{description, amount}", "Add an expense"),
    ("PUT", "/api/expense/{id}", "{description, amount}", "Update an expense"),
    ("DELETE", "/api/expense/{id}", "", "Delete an expense"),
];

/// Render the API reference.
pub fn render(signed_in: bool) -> Html<String> {
    let rows: String = ENDPOINTS
        .iter()
        .map(|(method, path, body, summary)| {
            format!(
                "<tr><td><code>{method}</code></td><td><code>{path}</code></td><td><code>{body}</code></td><td>{summary}</td></tr>"
            )
        })
        .collect();

    let body = format!(
        r#"<div class="card">
<h1>API reference</h1>
<p>All endpoints live under <code>/api</code> and exchange JSON. Everything except
health, sign-up, sign-in and confirmation needs the session cookie set by sign-in
(or <code>Authorization: Bearer &lt;token&gt;</code>).</p>
<p>Errors are <code>{{"error": "message"}}</code> with status 400 (invalid input),
401 (no valid session), 404 (missing or not yours), 409 (e-mail taken) or 500.</p>
<table>
<thead><tr><th>Method</th><th>Path</th><th>Body</th><th>Description</th></tr></thead>
<tbody>{rows}</tbody>
</table>
</div>"#
    );

    page("API reference", signed_in, &body, "")
}
