//! HTML pages served by the gateway.
//!
//! Two pages only: the credential form and a diagnostic stand-in for the
//! protected backend.  Presentation carries no control-flow logic.

/// The login form, posting `username`/`password` to `POST /auth`.
pub fn login() -> &'static str {
    LOGIN_PAGE
}

/// Diagnostic backend page, confirming the request passed the guard and
/// echoing the session token.
pub fn backend(token: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Backend Access</title>
  <style>
    body {{ font-family: sans-serif; display: flex; justify-content: center; margin-top: 10vh; }}
    .card {{ background: #fff; border: 1px solid #ddd; border-radius: 8px; padding: 2rem; width: 26rem; text-align: center; }}
    .token {{ background: #eee; border-radius: 4px; padding: .5rem; font-family: monospace; word-break: break-all; }}
  </style>
</head>
<body>
  <div class="card">
    <h1>Backend Access</h1>
    <p>You have successfully reached the protected backend.</p>
    <p><strong>Session token:</strong></p>
    <div class="token">{}</div>
    <p><a href="/logout">Logout</a></p>
  </div>
</body>
</html>
"#,
        escape(token)
    )
}

const LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Login</title>
  <style>
    body { font-family: sans-serif; display: flex; justify-content: center; margin-top: 10vh; }
    form { background: #fff; border: 1px solid #ddd; border-radius: 8px; padding: 2rem; width: 20rem; display: flex; flex-direction: column; gap: .75rem; }
    input, button { padding: .6rem; font-size: 1rem; }
  </style>
</head>
<body>
  <form method="POST" action="/auth">
    <h1>Login</h1>
    <input type="text" name="username" placeholder="Username" required>
    <input type="password" name="password" placeholder="Password" required>
    <button type="submit">Login</button>
  </form>
</body>
</html>
"#;

/// Minimal HTML escaping for values interpolated into a page.
fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_page_posts_to_the_auth_route() {
        let page = login();
        assert!(page.contains(r#"action="/auth""#));
        assert!(page.contains(r#"name="username""#));
        assert!(page.contains(r#"name="password""#));
    }

    #[test]
    fn backend_page_echoes_the_token() {
        let page = backend("tok-abc123");
        assert!(page.contains("tok-abc123"));
        assert!(page.contains(r#"href="/logout""#));
    }

    #[test]
    fn token_is_escaped_before_interpolation() {
        let page = backend(r#"<script>alert("x")</script>"#);
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
    }
}
