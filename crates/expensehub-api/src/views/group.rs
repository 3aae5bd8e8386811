//! Group detail screen: expenses and their total.

use std::fmt::Write;

use axum::response::Html;

use expensehub_entity::expense::{Expense, total_amount};
use expensehub_entity::group::Group;

use super::layout::{escape, page};

/// Format an amount with two decimals.
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Render `group` with its `expenses` (already newest first).
pub fn render(group: &Group, expenses: &[Expense]) -> Html<String> {
    let mut rows = String::new();
    for expense in expenses {
        let _ = write!(
            rows,
            r#"<tr>
<td>{description}</td>
<td class="amount">{amount}</td>
<td class="muted">{created}</td>
<td class="row">
  <button class="secondary" data-id="{id}" data-description="{description}" data-amount="{raw}" onclick="openEdit(this)">Edit</button>
  <button class="danger" onclick="deleteExpense('{id}')">Delete</button>
</td>
</tr>"#,
            id = expense.id,
            description = escape(&expense.description),
            amount = format_amount(expense.amount),
            raw = expense.amount,
            created = expense.created_at.format("%Y-%m-%d %H:%M"),
        );
    }

    let list = if expenses.is_empty() {
        r#"<p class="muted">No expenses yet.</p>"#.to_string()
    } else {
        format!(
            r#"<table>
<thead><tr><th>Description</th><th class="amount">Amount</th><th>Date</th><th></th></tr></thead>
<tbody>{rows}</tbody>
</table>"#
        )
    };

    let body = format!(
        r#"<p><a href="/dashboard">&larr; All groups</a></p>
<div class="card">
<h1>{name}</h1>
<p>Total: <strong id="total">{total}</strong></p>
<form class="row" onsubmit="createExpense(event)">
  <input id="expense-description" class="grow" placeholder="Description" required>
  <input id="expense-amount" type="number" step="0.01" min="0.01" placeholder="Amount" required>
  <button type="submit">Add expense</button>
</form>
<p id="expense-error" class="error"></p>
</div>
<div class="card">{list}</div>
<dialog id="edit-dialog">
  <form class="row" onsubmit="submitEdit(event)">
    <input id="edit-description" class="grow" required>
    <input id="edit-amount" type="number" step="0.01" min="0.01" required>
    <button type="submit">Save</button>
    <button type="button" class="secondary" onclick="document.getElementById('edit-dialog').close()">Cancel</button>
  </form>
  <p id="edit-error" class="error"></p>
</dialog>"#,
        name = escape(&group.name),
        total = format_amount(total_amount(expenses)),
    );

    let script = format!(
        r#"
const groupId = '{group_id}';
let editId = null;
async function createExpense(e) {{
  e.preventDefault();
  try {{
    await api('POST', '/api/expenses/' + groupId, {{
      description: document.getElementById('expense-description').value,
      amount: document.getElementById('expense-amount').value,
    }});
    window.location.reload();
  }} catch (err) {{ showError('expense-error', err); }}
}}
function openEdit(button) {{
  editId = button.dataset.id;
  document.getElementById('edit-description').value = button.dataset.description;
  document.getElementById('edit-amount').value = button.dataset.amount;
  document.getElementById('edit-error').textContent = '';
  document.getElementById('edit-dialog').showModal();
}}
async function submitEdit(e) {{
  e.preventDefault();
  try {{
    await api('PUT', '/api/expense/' + editId, {{
      description: document.getElementById('edit-description').value,
      amount: document.getElementById('edit-amount').value,
    }});
    window.location.reload();
  }} catch (err) {{ showError('edit-error', err); }}
}}
async function deleteExpense(id) {{
  if (!confirm('Delete this expense?')) return;
  try {{
    await api('DELETE', '/api/expense/' + id);
    window.location.reload();
  }} catch (err) {{ showError('expense-error', err); }}
}}
"#,
        group_id = group.id,
    );

    page(&group.name, true, &body, &script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn expense(group_id: Uuid, description: &str, amount: f64) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            description: description.to_string(),
            amount,
            group_id,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(42.5), "42.50");
        assert_eq!(format_amount(3.14159), "3.14");
        assert_eq!(format_amount(1000.0), "1000.00");
    }

    #[test]
    fn test_total_rendered() {
        let group = Group {
            id: Uuid::new_v4(),
            name: "Trip".to_string(),
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
        };
        let expenses = vec![
            expense(group.id, "Dinner", 42.5),
            expense(group.id, "Taxi & tip", 7.25),
        ];
        let Html(html) = render(&group, &expenses);
        assert!(html.contains(r#"<strong id="total">49.75</strong>"#));
        assert!(html.contains("Taxi &amp; tip"));
    }
}
