//! Gateway configuration.
//!
//! Identity-provider parameters and listen settings are read from the
//! environment once at startup, validated eagerly, and injected into Axum
//! handlers via [`axum::extract::State`].  A missing required variable
//! aborts startup instead of surfacing on the first login attempt.

use crate::error::GatewayError;

/// Parameters of the OAuth identity provider the gateway exchanges
/// credentials against.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the provider (e.g. `https://dev-1234.okta.example.com/oauth2/default`).
    pub issuer_url: String,
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
}

impl ProviderConfig {
    /// Build a provider configuration, normalising the issuer URL.
    ///
    /// Trailing slashes are stripped so [`token_url`](Self::token_url) never
    /// produces a double slash.  Empty fields are rejected.
    pub fn new(
        issuer_url: String,
        client_id: String,
        client_secret: String,
    ) -> Result<Self, GatewayError> {
        let issuer_url = issuer_url.trim_end_matches('/').to_string();
        if issuer_url.is_empty() {
            return Err(GatewayError::Config("issuer URL must not be empty".into()));
        }
        if client_id.is_empty() {
            return Err(GatewayError::Config("client id must not be empty".into()));
        }
        if client_secret.is_empty() {
            return Err(GatewayError::Config(
                "client secret must not be empty".into(),
            ));
        }
        Ok(Self {
            issuer_url,
            client_id,
            client_secret,
        })
    }

    /// Token endpoint of the provider.
    pub fn token_url(&self) -> String {
        format!("{}/v1/token", self.issuer_url)
    }
}

/// Global configuration shared across all handlers.
///
/// Constructed once at startup and passed as Axum shared state.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Identity provider the password grant is exchanged against.
    pub provider: ProviderConfig,
    /// Port to listen on (default `3000`).
    pub listen_port: u16,
}

impl GatewayConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable             | Default | Description                        |
    /// |----------------------|---------|------------------------------------|
    /// | `OIDC_ISSUER`        | —       | base URL of the identity provider  |
    /// | `OIDC_CLIENT_ID`     | —       | OAuth client id                    |
    /// | `OIDC_CLIENT_SECRET` | —       | OAuth client secret                |
    /// | `GATEWAY_PORT`       | `3000`  | HTTP listen port                   |
    ///
    /// The three provider variables are required; absence or an empty value
    /// is a [`GatewayError::Config`].
    pub fn from_env() -> Result<Self, GatewayError> {
        let provider = ProviderConfig::new(
            require("OIDC_ISSUER")?,
            require("OIDC_CLIENT_ID")?,
            require("OIDC_CLIENT_SECRET")?,
        )?;

        let listen_port: u16 = std::env::var("GATEWAY_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        Ok(Self {
            provider,
            listen_port,
        })
    }
}

/// Read a required environment variable, treating empty as unset.
fn require(name: &str) -> Result<String, GatewayError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| GatewayError::Config(format!("{name} must be set")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(issuer: &str) -> Result<ProviderConfig, GatewayError> {
        ProviderConfig::new(issuer.to_string(), "client".into(), "secret".into())
    }

    #[test]
    fn token_url_appends_the_endpoint_path() {
        let cfg = provider("https://idp.example.com/oauth2/default").unwrap();
        assert_eq!(
            cfg.token_url(),
            "https://idp.example.com/oauth2/default/v1/token"
        );
    }

    #[test]
    fn trailing_slash_is_normalised() {
        let cfg = provider("https://idp.example.com/").unwrap();
        assert_eq!(cfg.issuer_url, "https://idp.example.com");
        assert_eq!(cfg.token_url(), "https://idp.example.com/v1/token");
    }

    #[test]
    fn empty_issuer_is_rejected() {
        assert!(matches!(provider(""), Err(GatewayError::Config(_))));
        // A bare slash normalises down to the empty string.
        assert!(matches!(provider("/"), Err(GatewayError::Config(_))));
    }

    #[test]
    fn empty_client_credentials_are_rejected() {
        let err = ProviderConfig::new("https://idp".into(), String::new(), "secret".into());
        assert!(matches!(err, Err(GatewayError::Config(_))));

        let err = ProviderConfig::new("https://idp".into(), "client".into(), String::new());
        assert!(matches!(err, Err(GatewayError::Config(_))));
    }
}
