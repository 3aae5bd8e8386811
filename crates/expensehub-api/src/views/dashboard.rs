//! Main listing screen: the caller's groups.

use std::fmt::Write;

use axum::response::Html;

use expensehub_entity::group::Group;

use super::layout::{escape, page};

/// Render the dashboard for `groups` (already newest first).
pub fn render(email: &str, groups: &[Group]) -> Html<String> {
    let mut rows = String::new();
    for group in groups {
        let _ = write!(
            rows,
            r#"<tr>
<td><a href="/groups/{id}">{name}</a></td>
<td class="muted">{created}</td>
<td class="row">
  <button class="secondary" data-id="{id}" data-name="{name}" onclick="openRename(this)">Rename</button>
  <button class="danger" onclick="deleteGroup('{id}')">Delete</button>
</td>
</tr>"#,
            id = group.id,
            name = escape(&group.name),
            created = group.created_at.format("%Y-%m-%d"),
        );
    }

    let list = if groups.is_empty() {
        r#"<p class="muted">No groups yet. Create one above.</p>"#.to_string()
    } else {
        format!("<table><tbody>{rows}</tbody></table>")
    };

    let body = format!(
        r#"<div class="card">
<h1>Your groups</h1>
<p class="muted">Signed in as {email}</p>
<form class="row" onsubmit="createGroup(event)">
  <input id="group-name" class="grow" placeholder="New group name" required>
  <button type="submit">Create group</button>
</form>
<p id="group-error" class="error"></p>
</div>
<div class="card">{list}</div>
<dialog id="rename-dialog">
  <form class="row" onsubmit="submitRename(event)">
    <input id="rename-name" class="grow" required>
    <button type="submit">Save</button>
    <button type="button" class="secondary" onclick="document.getElementById('rename-dialog').close()">Cancel</button>
  </form>
  <p id="rename-error" class="error"></p>
</dialog>"#,
        email = escape(email),
    );

    let script = r#"
let renameId = null;
async function createGroup(e) {
  e.preventDefault();
  try {
    await api('POST', '/api/groups', { name: document.getElementById('group-name').value });
    window.location.reload();
  } catch (err) { showError('group-error', err); }
}
function openRename(button) {
  renameId = button.dataset.id;
  document.getElementById('rename-name').value = button.dataset.name;
  document.getElementById('rename-error').textContent = '';
  document.getElementById('rename-dialog').showModal();
}
async function submitRename(e) {
  e.preventDefault();
  try {
    await api('PUT', '/api/groups/' + renameId, { name: document.getElementById('rename-name').value });
    window.location.reload();
  } catch (err) { showError('rename-error', err); }
}
async function deleteGroup(id) {
  if (!confirm('Delete this group and all of its expenses?')) return;
  try {
    await api('DELETE', '/api/groups/' + id);
    window.location.reload();
  } catch (err) { showError('group-error', err); }
}
"#;

    page("Dashboard", true, &body, script)
}
