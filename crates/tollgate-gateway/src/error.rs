//! Error types for the gateway.
//!
//! [`GatewayError`] unifies all failure modes and implements
//! [`axum::response::IntoResponse`] so handlers can return
//! `Result<…, GatewayError>` directly.  The mapping keeps credential
//! rejections and transient provider failures strictly apart: a rejected
//! grant redirects to the landing page exactly like the original flow,
//! while a provider outage is a 500 and never masquerades as a bad login.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Errors that can occur while gating a request or exchanging credentials.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Required configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The credential post lacked a username or a password.
    #[error("missing credentials")]
    MissingCredentials,

    /// The identity provider rejected the grant (wrong credentials or a
    /// provider-side refusal — deliberately not distinguished).
    #[error("identity provider rejected the grant (status {status})")]
    GrantRejected {
        /// HTTP status returned by the provider.
        status: u16,
        /// Raw response body, kept for server-side logging only.
        body: String,
    },

    /// The HTTP call to the provider failed at the transport level.
    #[error("failed to reach identity provider: {0}")]
    ProviderUnreachable(#[from] reqwest::Error),

    /// The provider answered 2xx with a body that is not valid JSON.
    #[error("identity provider returned an unreadable body: {0}")]
    MalformedProviderResponse(#[from] serde_json::Error),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match &self {
            Self::MissingCredentials => {
                tracing::warn!("credential post rejected: username or password missing");
                (StatusCode::BAD_REQUEST, "Missing credentials").into_response()
            }
            // The client learns nothing beyond the redirect; the provider's
            // answer is logged so operators can tell bad credentials from a
            // misconfigured client.
            Self::GrantRejected { status, body } => {
                tracing::warn!(
                    provider_status = *status,
                    provider_body = %body,
                    "identity provider rejected the grant"
                );
                found("/")
            }
            Self::Config(_) | Self::ProviderUnreachable(_) | Self::MalformedProviderResponse(_) => {
                tracing::error!(error = %self, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

/// A `302 Found` redirect.
///
/// [`axum::response::Redirect`] only emits 303/307/308; the original flow
/// answers 302 for every redirect, so the response is built explicitly.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_owned())]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credentials_is_a_400() {
        let res = GatewayError::MissingCredentials.into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn grant_rejection_redirects_to_the_landing_page() {
        let res = GatewayError::GrantRejected {
            status: 401,
            body: r#"{"error":"invalid_grant"}"#.into(),
        }
        .into_response();
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/");
    }

    #[test]
    fn transient_failures_are_500s() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let res = GatewayError::MalformedProviderResponse(parse_err).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let res = GatewayError::Config("OIDC_ISSUER must be set".into()).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn found_sets_status_and_location() {
        let res = found("/login");
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/login");
    }

    #[test]
    fn error_display_grant_rejected() {
        let err = GatewayError::GrantRejected {
            status: 401,
            body: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "identity provider rejected the grant (status 401)"
        );
    }
}
