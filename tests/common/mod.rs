use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    routing::get,
};
use courseware::courseware_auth::IdentityClient;
use courseware::courseware_config::{IdentityConfig, OAuthConfig, ServerConfig};
use courseware::router::init_router;
use courseware::state::AppState;
use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Sentence};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEACHER_TOKEN: &str = "teacher-token";
pub const STUDENT_TOKEN: &str = "student-token";
pub const TEACHER_ID: Uuid = Uuid::from_u128(0x7b0c1d2e_3f40_4a5b_8c6d_7e8f90a1b2c3);
pub const STUDENT_ID: Uuid = Uuid::from_u128(0x1a2b3c4d_5e6f_4a7b_8c9d_0e1f2a3b4c5d);

/// Identity service stand-in. Counts every validation call it receives.
#[derive(Clone)]
pub struct MockIdentity {
    pub validate_url: String,
    pub calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockIdentity {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

async fn validate_handler(
    State(calls): State<Arc<AtomicUsize>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    calls.fetch_add(1, Ordering::SeqCst);

    let header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let claims = match header.strip_prefix("Bearer ") {
        Some(TEACHER_TOKEN) => json!({"user_id": TEACHER_ID, "username": "ada", "role": "teacher"}),
        Some(STUDENT_TOKEN) => json!({"user_id": STUDENT_ID, "username": "alan", "role": "student"}),
        _ => return (StatusCode::UNAUTHORIZED, Json(json!({"error": "invalid token"}))),
    };

    (StatusCode::OK, Json(json!({ "data": claims })))
}

pub async fn spawn_identity_service() -> MockIdentity {
    let calls = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/v1/auth/validate", get(validate_handler))
        .with_state(calls.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockIdentity {
        validate_url: format!("http://{}/v1/auth/validate", addr),
        calls,
    }
}

pub fn test_oauth_config() -> OAuthConfig {
    OAuthConfig {
        secret: "test-secret-key-at-least-32-characters-long".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn test_state(pool: PgPool, identity: &MockIdentity) -> AppState {
    let identity_config = IdentityConfig {
        validate_url: identity.validate_url.clone(),
        ..IdentityConfig::default()
    };

    AppState {
        db: pool,
        identity: IdentityClient::new(&identity_config).unwrap(),
        oauth_config: test_oauth_config(),
        server_config: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
    }
}

#[allow(dead_code)]
pub async fn setup_test_app(pool: PgPool) -> (Router, MockIdentity) {
    let identity = spawn_identity_service().await;
    let app = init_router(test_state(pool, &identity));
    (app, identity)
}

pub fn build_request(
    method: &str,
    uri: &str,
    authorization: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(authorization) = authorization {
        builder = builder.header("authorization", authorization);
    }

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Sends a request and returns the status with the body parsed as JSON
/// (`Value::Null` when the body is not JSON).
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, body)
}

#[allow(dead_code)]
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

#[allow(dead_code)]
pub fn fake_title() -> String {
    Sentence(2..5).fake()
}

#[allow(dead_code)]
pub fn fake_content() -> String {
    Paragraph(1..3).fake()
}
