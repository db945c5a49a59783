use axum::{
    extract::Form,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::OnceLock;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use chrono::{Utc, Duration};
use rsa::{RsaPrivateKey, RsaPublicKey, pkcs1::EncodeRsaPrivateKey};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use uuid::Uuid;


// Global Keys
struct OidcKeys {
    encoding_key: EncodingKey,
    public_jwk: Value,
}

static KEYS: OnceLock<OidcKeys> = OnceLock::new();

#[tokio::main]
async fn main() {
    // 1. Generate RSA Key Pair on Startup
    println!("MOCK-OIDC: Generating RSA-2048 keys...");
    let mut rng = rand::thread_rng();
    let bits = 2048;
    let priv_key = RsaPrivateKey::new(&mut rng, bits).expect("Failed to generate private key");
    let pub_key = RsaPublicKey::from(&priv_key);

    // Convert to PEM for jsonwebtoken
    // jsonwebtoken EncodingKey::from_rsa_pem expects PKCS#1 or PKCS#8.
    let priv_pem = priv_key.to_pkcs1_pem(rsa::pkcs8::LineEnding::LF).unwrap();
    let encoding_key = EncodingKey::from_rsa_pem(priv_pem.as_bytes()).unwrap();

    // Construct JWK for the public key (Naive construction)
    // For proper JWK we need Modulus (n) and Exponent (e) in Base64URL
    use rsa::traits::PublicKeyParts;
    let n = base64_url_encode_bytes(&pub_key.n().to_bytes_be());
    let e = base64_url_encode_bytes(&pub_key.e().to_bytes_be());

    let public_jwk = json!({
        "kty": "RSA",
        "alg": "RS256",
        "use": "sig",
        "kid": "mock-key-1",
        "n": n,
        "e": e
    });

    KEYS.set(OidcKeys { encoding_key, public_jwk }).ok().unwrap();

    // 2. Setup Routes
    let app = Router::new()
        .route("/.well-known/openid-configuration", get(openid_configuration))
        .route("/jwks", get(jwks))
        .route("/v1/token", post(token));

    let listener = tokio::net::TcpListener::bind("0.0.0.0:4000").await.unwrap();
    println!("MOCK-OIDC: Listening on http://localhost:4000");
    axum::serve(listener, app).await.unwrap();
}

// --- Endpoints ---

async fn openid_configuration() -> Json<Value> {
    Json(json!({
        "issuer": "http://localhost:4000",
        "token_endpoint": "http://localhost:4000/v1/token",
        "jwks_uri": "http://localhost:4000/jwks",
        "grant_types_supported": ["password"],
        "subject_types_supported": ["public"],
        "id_token_signing_alg_values_supported": ["RS256"]
    }))
}

async fn jwks() -> Json<Value> {
    let keys = KEYS.get().unwrap();
    Json(json!({
        "keys": [keys.public_jwk.clone()]
    }))
}

#[derive(Deserialize)]
struct TokenRequest {
    #[serde(default)]
    grant_type: String,
    #[serde(default)]
    client_id: String,
    // client_secret accepted leniently: this mock exercises the gateway,
    // it does not re-implement a real provider's client authentication.
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    scope: Option<String>,
}

#[derive(Serialize)]
struct IdTokenClaims {
    iss: String,
    sub: String,
    aud: String,
    exp: i64,
    iat: i64,
    jti: String,
    // Custom claims
    name: String,
    email: String,
}

/// Demo user table. Anything not listed here fails with `invalid_grant`.
fn lookup_user(username: &str, password: &str) -> Option<(&'static str, &'static str)> {
    match (username, password) {
        ("alice", "wonderland") => Some(("100001", "Alice Example")),
        ("bob", "builder") => Some(("100002", "Bob Example")),
        _ => None,
    }
}

async fn token(Form(req): Form<TokenRequest>) -> impl IntoResponse {
    println!(
        "MOCK-OIDC: Token request grant_type='{}' client_id='{}' username='{}'",
        req.grant_type, req.client_id, req.username
    );

    if req.grant_type != "password" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "unsupported_grant_type",
                "error_description": "this mock only supports the password grant"
            })),
        );
    }

    let Some((sub, name)) = lookup_user(&req.username, &req.password) else {
        println!("MOCK-OIDC: Rejecting credentials for '{}'", req.username);
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "invalid_grant",
                "error_description": "The credentials provided were invalid."
            })),
        );
    };

    let now = Utc::now();
    let exp = now + Duration::hours(1);
    let scope = req.scope.unwrap_or_else(|| "openid profile email".to_string());

    let claims = IdTokenClaims {
        iss: "http://localhost:4000".to_string(),
        sub: sub.to_string(),
        aud: "tollgate-gateway".to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
        jti: Uuid::new_v4().to_string(),
        name: name.to_string(),
        email: format!("{}@example.test", req.username),
    };

    let keys = KEYS.get().unwrap();
    let header = Header {
        kid: Some("mock-key-1".to_string()),
        alg: Algorithm::RS256,
        ..Default::default()
    };

    let id_token = encode(&header, &claims, &keys.encoding_key).unwrap();

    // Opaque access token; the gateway stores it verbatim without parsing.
    let access_token = format!("tollgate_{}", sub);

    (
        StatusCode::OK,
        Json(json!({
            "access_token": access_token,
            "id_token": id_token,
            "token_type": "Bearer",
            "expires_in": 3600,
            "scope": scope
        })),
    )
}

fn base64_url_encode_bytes(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_users_resolve() {
        assert_eq!(lookup_user("alice", "wonderland"), Some(("100001", "Alice Example")));
        assert_eq!(lookup_user("bob", "builder"), Some(("100002", "Bob Example")));
    }

    #[test]
    fn wrong_password_or_unknown_user_is_rejected() {
        assert_eq!(lookup_user("alice", "builder"), None);
        assert_eq!(lookup_user("mallory", "hunter2"), None);
        assert_eq!(lookup_user("", ""), None);
    }
}
