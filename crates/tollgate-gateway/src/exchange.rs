//! OAuth password-grant exchange.
//!
//! Sends a username/password pair to the provider's token endpoint and
//! returns the access token on success.  The provider's answer is
//! classified at this boundary — rejected grant vs. transport failure vs.
//! unreadable body — so nothing partially shaped leaks into the handlers.

use crate::config::ProviderConfig;
use crate::error::GatewayError;

/// Exchange a username/password pair for an access token.
///
/// Issues a single form-encoded POST to `{issuer}/v1/token` with the
/// Resource Owner Password Credentials grant.  No retry, no timeout beyond
/// what the transport enforces.
///
/// Classification of the outcome:
/// - empty username or password → [`GatewayError::MissingCredentials`],
///   without touching the network;
/// - non-2xx status, or a 2xx body without a usable `access_token` →
///   [`GatewayError::GrantRejected`];
/// - transport failure → [`GatewayError::ProviderUnreachable`];
/// - 2xx body that is not JSON → [`GatewayError::MalformedProviderResponse`].
pub async fn password_grant(
    provider: &ProviderConfig,
    username: &str,
    password: &str,
) -> Result<String, GatewayError> {
    if username.is_empty() || password.is_empty() {
        return Err(GatewayError::MissingCredentials);
    }

    let client = reqwest::Client::new();
    let res = client
        .post(provider.token_url())
        .form(&[
            ("grant_type", "password"),
            ("client_id", provider.client_id.as_str()),
            ("client_secret", provider.client_secret.as_str()),
            ("username", username),
            ("password", password),
            ("scope", "openid profile email"),
        ])
        .send()
        .await?;

    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        return Err(GatewayError::GrantRejected {
            status: status.as_u16(),
            body,
        });
    }

    let json: serde_json::Value = serde_json::from_str(&body)?;

    // An empty token would mint a cookie the guard treats as absent, so it
    // counts as a rejection like a missing field.
    match json["access_token"].as_str().filter(|t| !t.is_empty()) {
        Some(token) => Ok(token.to_string()),
        None => Err(GatewayError::GrantRejected {
            status: status.as_u16(),
            body,
        }),
    }
}
