//! Session-cookie lifecycle.
//!
//! The session artifact is a single opaque cookie holding the provider's
//! access token verbatim — no re-encoding, no signing.  Possession of a
//! non-empty cookie is the entire trust decision (see DESIGN.md for why
//! that is preserved rather than fixed).

use axum_extra::extract::cookie::{Cookie, CookieJar};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session_token";

/// Build the session cookie for a freshly issued access token.
///
/// `HttpOnly` + `Secure` + `Path=/`, no explicit expiry: the cookie lives
/// for the browser session unless revoked.
pub fn issue(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(true)
        .path("/")
        .build()
}

/// Build the cookie used to revoke a session.
///
/// Carries the same name and path so [`CookieJar::remove`] produces a
/// matching removal cookie.  Revoking an absent session is a no-op.
pub fn revoke() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .secure(true)
        .path("/")
        .build()
}

/// Extract the session token from a request's cookies.
///
/// An empty value counts as absent: a garbage empty token must not grant
/// access.
pub fn token_from(jar: &CookieJar) -> Option<&str> {
    jar.get(SESSION_COOKIE)
        .map(Cookie::value)
        .filter(|v| !v.is_empty())
}
