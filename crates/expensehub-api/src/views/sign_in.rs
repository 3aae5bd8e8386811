//! Authentication form: sign-in and sign-up modes.

use axum::response::Html;

use expensehub_auth::guard::HOME_PATH;

use super::layout::page;

/// Render the sign-in screen.
pub fn render() -> Html<String> {
    let body = r##"<div class="card">
<h1 id="title">Sign in</h1>
<form id="auth-form" onsubmit="submitAuth(event)">
  <p><input id="email" type="email" placeholder="Email" required style="width:100%"></p>
  <p><input id="password" type="password" placeholder="Password" required style="width:100%"></p>
  <p id="username-row" hidden><input id="username" type="text" placeholder="Username" style="width:100%"></p>
  <p><button id="submit" type="submit">Sign in</button></p>
</form>
<p id="auth-error" class="error"></p>
<p id="auth-notice" class="notice"></p>
<p class="muted"><a href="#" id="toggle" onclick="toggleMode(event)">Need an account? Sign up</a></p>
</div>"##;

    let script = format!(
        r#"
let signUp = false;
function toggleMode(e) {{
  e.preventDefault();
  signUp = !signUp;
  document.getElementById('title').textContent = signUp ? 'Sign up' : 'Sign in';
  document.getElementById('submit').textContent = signUp ? 'Sign up' : 'Sign in';
  document.getElementById('username-row').hidden = !signUp;
  document.getElementById('toggle').textContent = signUp ? 'Have an account? Sign in' : 'Need an account? Sign up';
  document.getElementById('auth-error').textContent = '';
  document.getElementById('auth-notice').textContent = '';
}}
async function submitAuth(e) {{
  e.preventDefault();
  document.getElementById('auth-error').textContent = '';
  document.getElementById('auth-notice').textContent = '';
  const email = document.getElementById('email').value;
  const password = document.getElementById('password').value;
  try {{
    if (signUp) {{
      const username = document.getElementById('username').value;
      const data = await api('POST', '/api/auth/sign-up', {{ email, password, username }});
      document.getElementById('auth-notice').textContent = data.message;
    }} else {{
      await api('POST', '/api/auth/sign-in', {{ email, password }});
      window.location.href = '{HOME_PATH}';
    }}
  }} catch (err) {{
    showError('auth-error', err);
  }}
}}
"#
    );

    page("Sign in", false, body, &script)
}
