//! HTTP surface of the gateway.
//!
//! Three public routes (`/login`, `/auth`, `/logout`) and a guarded
//! catch-all standing in for the protected backend.  Handlers return
//! `Result<…, GatewayError>`; every provider-call failure is absorbed at
//! the `/auth` boundary by the error's `IntoResponse` impl.

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::response::{Html, Response};
use axum::routing::{get, post};
use axum::{Router, middleware};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::info;

use crate::config::GatewayConfig;
use crate::error::{GatewayError, found};
use crate::{exchange, guard, pages, session};

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

/// State shared across all Axum handlers.
pub struct AppState {
    /// Global configuration (identity provider + listen parameters).
    pub config: GatewayConfig,
}

/// Body of `POST /auth`.
///
/// Fields default to empty so a missing field classifies as missing
/// credentials (400) rather than a deserialization rejection.
#[derive(Deserialize)]
struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Assemble the full gateway router.
///
/// The guard wraps only the catch-all: the login surface must stay
/// reachable without a session or no client could ever obtain one.
pub fn router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .fallback(backend_echo)
        .layer(middleware::from_fn(guard::require_session));

    Router::new()
        .route("/login", get(login_page))
        .route("/auth", post(authenticate))
        .route("/logout", get(logout))
        .merge(protected)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /login` — render the credential form.
async fn login_page() -> Html<&'static str> {
    Html(pages::login())
}

/// `POST /auth` — exchange credentials for a session cookie.
///
/// The cookie and the redirect travel on the same response, so a client
/// following the redirect is already authenticated.  Re-authenticating
/// simply overwrites the previous cookie.
async fn authenticate(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Response), GatewayError> {
    if form.username.is_empty() || form.password.is_empty() {
        return Err(GatewayError::MissingCredentials);
    }

    info!(username = %form.username, "authenticating user");

    let token =
        exchange::password_grant(&state.config.provider, &form.username, &form.password).await?;

    info!(username = %form.username, "authentication successful, issuing session cookie");

    Ok((jar.add(session::issue(token)), found("/")))
}

/// `GET /logout` — revoke the session cookie.
///
/// Idempotent: revoking an absent session still redirects to `/login`.
async fn logout(jar: CookieJar) -> (CookieJar, Response) {
    (jar.remove(session::revoke()), found("/login"))
}

/// Catch-all behind the session guard.
///
/// Stands in for the protected backend and echoes the session token for
/// diagnostics.  The guard guarantees a non-empty token is present.
async fn backend_echo(jar: CookieJar) -> Html<String> {
    let token = session::token_from(&jar).unwrap_or_default();
    Html(pages::backend(token))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
