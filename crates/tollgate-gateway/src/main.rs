//! Tollgate gateway — session-gating edge in front of a protected backend.
//!
//! Every inbound request is gated on a session cookie:
//!
//! 1. Requests without one are redirected to the login form.
//! 2. Posted credentials are exchanged for an access token at the identity
//!    provider (OAuth 2.0 password grant).
//! 3. The token is carried verbatim in an `HttpOnly` cookie from then on;
//!    cookie presence is what admits subsequent requests.

mod config;
mod error;
mod exchange;
mod guard;
mod pages;
mod routes;
mod session;

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use crate::config::GatewayConfig;
use crate::routes::AppState;

/// Session-gating authentication edge.
#[derive(Parser, Debug)]
#[command(name = "tollgate-gateway", about = "Session-gating authentication edge")]
struct Args {
    /// Listen port (overrides `GATEWAY_PORT`).
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    // Structured logging (controlled via RUST_LOG env var).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Configuration is validated up front: a gateway that cannot reach a
    // provider config should not accept a single request.
    let mut config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "refusing to start");
            std::process::exit(1);
        }
    };
    if let Some(port) = args.port {
        config.listen_port = port;
    }

    info!(
        issuer = %config.provider.issuer_url,
        client_id = %config.provider.client_id,
        "identity provider configured"
    );

    let listen_port = config.listen_port;
    let state = Arc::new(AppState { config });
    let app = routes::router(state);

    let addr = format!("0.0.0.0:{listen_port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");

    info!(address = %addr, "gateway listening");
    axum::serve(listener, app).await.expect("server error");
}
