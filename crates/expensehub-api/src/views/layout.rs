//! Shared page shell and HTML escaping.

use axum::response::Html;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f5f6f8; color: #1f2328; }
header { background: #2b59c3; color: #fff; padding: 12px 24px; display: flex; justify-content: space-between; align-items: center; }
header a { color: #fff; text-decoration: none; font-weight: 600; }
main { max-width: 760px; margin: 24px auto; padding: 0 16px; }
.card { background: #fff; border-radius: 8px; padding: 16px; margin-bottom: 16px; box-shadow: 0 1px 2px rgba(0,0,0,.08); }
.row { display: flex; gap: 8px; align-items: center; }
.row > .grow { flex: 1; }
input { padding: 8px; border: 1px solid #c9ccd1; border-radius: 4px; }
button { padding: 8px 12px; border: 0; border-radius: 4px; background: #2b59c3; color: #fff; cursor: pointer; }
button.secondary { background: #6e7781; }
button.danger { background: #cf222e; }
table { width: 100%; border-collapse: collapse; }
td, th { text-align: left; padding: 8px; border-bottom: 1px solid #eaecef; }
td.amount, th.amount { text-align: right; }
.error { color: #cf222e; }
.notice { color: #1a7f37; }
.muted { color: #6e7781; }
dialog { border: 0; border-radius: 8px; padding: 20px; }
"#;

/// Fetch helper shared by every page: sends JSON and surfaces `{error}`
/// messages verbatim.
const SCRIPT_PRELUDE: &str = r#"
async function api(method, url, body) {
  const res = await fetch(url, {
    method,
    headers: body === undefined ? {} : { 'Content-Type': 'application/json' },
    body: body === undefined ? undefined : JSON.stringify(body),
    credentials: 'same-origin',
  });
  const data = await res.json().catch(() => ({}));
  if (!res.ok) throw new Error(data.error || 'Request failed');
  return data;
}
function showError(id, err) { document.getElementById(id).textContent = err.message; }
async function signOut() {
  try { await api('POST', '/api/auth/sign-out'); } catch (_) {}
  window.location.href = '/';
}
"#;

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap `body` in the page shell. `signed_in` adds the sign-out control.
pub fn page(title: &str, signed_in: bool, body: &str, script: &str) -> Html<String> {
    let nav = if signed_in {
        r#"<span><a href="/docs">API</a> &nbsp; <button class="secondary" onclick="signOut()">Sign out</button></span>"#
    } else {
        r#"<a href="/docs">API</a>"#
    };
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · ExpenseHub</title>
<style>{STYLE}</style>
</head>
<body>
<header><a href="/dashboard">ExpenseHub</a>{nav}</header>
<main>
{body}
</main>
<script>{SCRIPT_PRELUDE}{script}</script>
</body>
</html>"#,
        title = escape(title),
    ))
}

/// The 404 page for unknown screens.
pub fn not_found_page() -> Html<String> {
    page(
        "Not found",
        false,
        r#"<div class="card"><h1>Page not found</h1><p><a href="/dashboard">Back to your groups</a></p></div>"#,
        "",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("Trip"), "Trip");
    }

    #[test]
    fn test_page_escapes_title() {
        let Html(html) = page("<script>", false, "", "");
        assert!(html.contains("<title>&lt;script&gt; · ExpenseHub</title>"));
    }
}
