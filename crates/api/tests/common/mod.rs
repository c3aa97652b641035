#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

use casting_api::auth::{KeyStore, TokenVerifier};
use casting_api::config::{AuthConfig, ServerConfig, StoreKind};
use casting_api::router::build_app_router;
use casting_api::state::AppState;
use casting_db::models::actor::CreateActor;
use casting_db::models::movie::CreateMovie;
use casting_db::{MemoryStore, Store};

pub const AUDIENCE: &str = "casting-agency";
pub const DOMAIN: &str = "casting.test";
pub const KID: &str = "test-key";

/// HS256 secret published as the `oct` key below (base64 of these bytes).
const SECRET: &[u8] = b"casting-agency-test-signing-key!!";
const SECRET_B64: &str = "Y2FzdGluZy1hZ2VuY3ktdGVzdC1zaWduaW5nLWtleSEh";

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` backed by the in-memory store, accepting
/// HS256 tokens for the test audience.
pub fn test_config() -> ServerConfig {
    let mut auth = AuthConfig::new(DOMAIN, AUDIENCE);
    auth.algorithms = vec![Algorithm::HS256];

    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        store: StoreKind::Memory,
        database_url: None,
        database_max_connections: 1,
        auth,
    }
}

pub fn test_key_set() -> JwkSet {
    serde_json::from_value(json!({
        "keys": [{ "kty": "oct", "kid": KID, "alg": "HS256", "k": SECRET_B64 }]
    }))
    .unwrap()
}

/// Build the full application router (same middleware stack as `main.rs`)
/// over a fresh in-memory store, returned alongside for seeding.
pub fn build_test_app() -> (Router, Arc<MemoryStore>) {
    build_test_app_with_store(Arc::new(MemoryStore::new()))
}

pub fn build_test_app_with_store<S: Store>(store: Arc<S>) -> (Router, Arc<S>) {
    build_test_app_with_config(store, test_config())
}

pub fn build_test_app_with_config<S: Store>(
    store: Arc<S>,
    config: ServerConfig,
) -> (Router, Arc<S>) {
    let verifier = TokenVerifier::with_key_store(&config.auth, KeyStore::with_keys(test_key_set()));
    let state = AppState::new(store.clone(), config.clone(), verifier);
    (build_app_router(state, &config), store)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Valid claims for the test audience and issuer.
pub fn claims(permissions: &[&str]) -> Value {
    json!({
        "sub": "auth0|test-user",
        "aud": AUDIENCE,
        "iss": format!("https://{DOMAIN}/"),
        "iat": now(),
        "exp": now() + 3600,
        "permissions": permissions,
    })
}

/// Sign arbitrary claims with the test key.
pub fn sign(claims: &Value) -> String {
    let mut header = Header::new(Algorithm::HS256);
    header.kid = Some(KID.to_string());
    encode(&header, claims, &EncodingKey::from_secret(SECRET)).unwrap()
}

pub fn token(permissions: &[&str]) -> String {
    sign(&claims(permissions))
}

/// Read-only role.
pub fn casting_assistant() -> String {
    token(&["get:actors", "get:movies"])
}

/// Manages actors and edits movies.
pub fn casting_director() -> String {
    token(&[
        "get:actors",
        "get:movies",
        "post:actors",
        "patch:actors",
        "delete:actors",
        "patch:movies",
    ])
}

/// Every permission.
pub fn executive_producer() -> String {
    token(&[
        "get:actors",
        "get:movies",
        "post:actors",
        "patch:actors",
        "delete:actors",
        "post:movies",
        "patch:movies",
        "delete:movies",
    ])
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

pub async fn seed_movie(store: &MemoryStore, title: &str, release_date: &str) -> i64 {
    store
        .insert_movie(&CreateMovie {
            title: title.to_string(),
            release_date: release_date.to_string(),
        })
        .await
        .unwrap()
        .id
}

pub async fn seed_actor(store: &MemoryStore, name: &str, age: i32, gender: &str) -> i64 {
    store
        .insert_actor(&CreateActor {
            name: name.to_string(),
            age,
            gender: gender.to_string(),
        })
        .await
        .unwrap()
        .id
}

/// Insert `n` movies titled `Movie 00`, `Movie 01`, ...
pub async fn seed_movies(store: &MemoryStore, n: usize) {
    for i in 0..n {
        seed_movie(store, &format!("Movie {i:02}"), "01-01-2000").await;
    }
}

/// Insert `n` actors named `Actor 00`, `Actor 01`, ...
pub async fn seed_actors(store: &MemoryStore, n: usize) {
    for i in 0..n {
        seed_actor(store, &format!("Actor {i:02}"), 30, "Female").await;
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn builder(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, builder(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        builder(Method::GET, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        builder(Method::DELETE, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    json_request(app, Method::POST, uri, body, Some(token)).await
}

pub async fn patch_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    json_request(app, Method::PATCH, uri, body, Some(token)).await
}

pub async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    body: Value,
    token: Option<&str>,
) -> Response {
    send(
        app,
        builder(method, uri, token)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// Send a raw body with an explicit content type.
pub async fn raw_request(
    app: Router,
    method: Method,
    uri: &str,
    content_type: &str,
    body: &str,
    token: Option<&str>,
) -> Response {
    send(
        app,
        builder(method, uri, token)
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the error envelope shape and return the message.
pub async fn assert_error(response: Response, status: u16) -> String {
    assert_eq!(response.status().as_u16(), status);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], status);
    json["message"].as_str().unwrap().to_string()
}
