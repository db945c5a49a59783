//! Session guard.
//!
//! Gating middleware run before every protected route: requests without a
//! session cookie are redirected to the login form and the downstream
//! handler is never invoked.  Any non-empty cookie value passes — the
//! guard performs no decoding, expiry or revocation check.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use crate::error::found;
use crate::session;

/// Admit the request if it carries a session cookie, else 302 to `/login`.
///
/// A missing cookie is a normal control-flow branch, not an error.
pub async fn require_session(jar: CookieJar, request: Request, next: Next) -> Response {
    if session::token_from(&jar).is_none() {
        return found("/login");
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{StatusCode, header};
    use axum::routing::get;
    use axum::{Router, middleware};
    use axum_extra::extract::cookie::Cookie;
    use axum_test::TestServer;

    fn guarded_app() -> TestServer {
        let app = Router::new()
            .route("/protected", get(|| async { "backend reached" }))
            .layer(middleware::from_fn(require_session));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn missing_cookie_redirects_to_login() {
        let res = guarded_app().get("/protected").await;
        res.assert_status(StatusCode::FOUND);
        assert_eq!(res.header(header::LOCATION), "/login");
    }

    #[tokio::test]
    async fn empty_cookie_counts_as_absent() {
        let res = guarded_app()
            .get("/protected")
            .add_cookie(Cookie::new(session::SESSION_COOKIE, ""))
            .await;
        res.assert_status(StatusCode::FOUND);
    }

    #[tokio::test]
    async fn any_nonempty_cookie_is_admitted() {
        let res = guarded_app()
            .get("/protected")
            .add_cookie(Cookie::new(session::SESSION_COOKIE, "not-even-a-jwt"))
            .await;
        res.assert_status_ok();
        res.assert_text("backend reached");
    }
}
