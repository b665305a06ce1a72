mod common;

use axum::{Json, Router, http::StatusCode, routing::get};
use courseware::cli::{issue_token, logout_session, revoke_session};
use courseware::courseware_auth::create_access_token;
use courseware::courseware_config::OAuthConfig;
use courseware::middleware::auth::AuthUser;
use courseware::middleware::gate::{Gate, apply_gates};
use common::{
    STUDENT_ID, STUDENT_TOKEN, TEACHER_ID, TEACHER_TOKEN, bearer, build_request, send,
    spawn_identity_service, test_oauth_config, test_state,
};
use serde_json::{Value, json};
use sqlx::PgPool;
use uuid::Uuid;

async fn whoami(auth_user: AuthUser) -> Json<Value> {
    Json(json!({
        "user_id": auth_user.user_id(),
        "role": auth_user.role(),
    }))
}

async fn ok() -> Json<Value> {
    Json(json!({ "ok": true }))
}

async fn gated_app(pool: PgPool, gates: &[Gate], with_claims: bool) -> Router {
    let identity = spawn_identity_service().await;
    let state = test_state(pool, &identity);

    let router = if with_claims {
        Router::new().route("/", get(whoami))
    } else {
        Router::new().route("/", get(ok))
    };

    apply_gates(router, &state, gates).with_state(state)
}

#[sqlx::test(migrations = "./migrations")]
async fn test_role_check_admits_teacher_with_claims(pool: PgPool) {
    let app = gated_app(pool, &[Gate::ValidateAuth, Gate::RoleCheck], true).await;

    let (status, body) = send(app, build_request("GET", "/", Some(&bearer(TEACHER_TOKEN)), None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], TEACHER_ID.to_string());
    assert_eq!(body["role"], "teacher");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_role_check_rejects_student(pool: PgPool) {
    let app = gated_app(pool, &[Gate::ValidateAuth, Gate::RoleCheck], true).await;

    let (status, body) = send(app, build_request("GET", "/", Some(&bearer(STUDENT_TOKEN)), None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "User not authorized");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_role_check_admits_student_only(pool: PgPool) {
    let app = gated_app(pool, &[Gate::ValidateAuth, Gate::UserRoleCheck], true).await;

    let (status, body) = send(
        app.clone(),
        build_request("GET", "/", Some(&bearer(STUDENT_TOKEN)), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], STUDENT_ID.to_string());

    let (status, _) = send(app, build_request("GET", "/", Some(&bearer(TEACHER_TOKEN)), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_require_role_custom(pool: PgPool) {
    let app = gated_app(pool, &[Gate::ValidateAuth, Gate::RequireRole("admin")], true).await;

    let (status, _) = send(app, build_request("GET", "/", Some(&bearer(TEACHER_TOKEN)), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_role_check_without_validate_auth_fails_closed(pool: PgPool) {
    let app = gated_app(pool, &[Gate::RoleCheck], false).await;

    let (status, _) = send(app, build_request("GET", "/", Some(&bearer(TEACHER_TOKEN)), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_validate_auth_rejects_non_bearer(pool: PgPool) {
    let app = gated_app(pool, &[Gate::ValidateAuth], true).await;

    let (status, _) = send(
        app.clone(),
        build_request("GET", "/", Some("Basic dXNlcjpwYXNz"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(app, build_request("GET", "/", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_client_credential_gate(pool: PgPool) {
    let app = gated_app(pool, &[Gate::ClientCredential], false).await;
    let config = test_oauth_config();

    let token = create_access_token("mobile-app", Uuid::new_v4(), None, &config).unwrap();
    let (status, body) = send(
        app.clone(),
        build_request("GET", "/", Some(&format!("bearer {}", token)), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);

    let (status, _) = send(app.clone(), build_request("GET", "/", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        app.clone(),
        build_request("GET", "/", Some(&format!("Basic {}", token)), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(app, build_request("GET", "/", Some("Bearer not-a-jwt"), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_client_credential_rejects_expired_and_foreign_tokens(pool: PgPool) {
    let app = gated_app(pool, &[Gate::ClientCredential], false).await;

    let expired_config = OAuthConfig {
        access_token_expiry: -60,
        ..test_oauth_config()
    };
    let expired = create_access_token("mobile-app", Uuid::new_v4(), None, &expired_config).unwrap();
    let (status, body) = send(app.clone(), build_request("GET", "/", Some(&bearer(&expired)), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Access token expired");

    let foreign_config = OAuthConfig {
        secret: "another-secret-key-at-least-32-characters".to_string(),
        ..test_oauth_config()
    };
    let foreign = create_access_token("mobile-app", Uuid::new_v4(), None, &foreign_config).unwrap();
    let (status, _) = send(app, build_request("GET", "/", Some(&bearer(&foreign)), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_client_credential_query_gate(pool: PgPool) {
    let app = gated_app(pool, &[Gate::ClientCredentialQuery], false).await;
    let token = create_access_token("webhook", Uuid::new_v4(), None, &test_oauth_config()).unwrap();

    let (status, _) = send(
        app.clone(),
        build_request("GET", &format!("/?token={}&token_type=Bearer", token), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        app.clone(),
        build_request("GET", &format!("/?token={}", token), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(app, build_request("GET", "/", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_password_gate_follows_session_state(pool: PgPool) {
    let app = gated_app(pool.clone(), &[Gate::Password], false).await;
    let config = test_oauth_config();

    let issued = issue_token(&pool, &config, "web-app", Some(Uuid::new_v4()))
        .await
        .unwrap();
    let credential = bearer(&issued.access_token);

    let (status, _) = send(app.clone(), build_request("GET", "/", Some(&credential), None)).await;
    assert_eq!(status, StatusCode::OK);

    logout_session(&pool, issued.session_id).await.unwrap();

    let (status, body) = send(app, build_request("GET", "/", Some(&credential), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "User is not logged in");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_password_gate_rejects_revoked_session(pool: PgPool) {
    let app = gated_app(pool.clone(), &[Gate::Password], false).await;

    let issued = issue_token(&pool, &test_oauth_config(), "web-app", Some(Uuid::new_v4()))
        .await
        .unwrap();
    revoke_session(&pool, issued.session_id).await.unwrap();

    let (status, _) = send(
        app,
        build_request("GET", "/", Some(&bearer(&issued.access_token)), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_password_gate_requires_user(pool: PgPool) {
    let app = gated_app(pool.clone(), &[Gate::Password], false).await;

    let issued = issue_token(&pool, &test_oauth_config(), "service-account", None)
        .await
        .unwrap();

    let (status, body) = send(
        app,
        build_request("GET", "/", Some(&bearer(&issued.access_token)), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "User is not logged in");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_password_gate_unknown_session(pool: PgPool) {
    let app = gated_app(pool, &[Gate::Password], false).await;

    let token = create_access_token(
        "web-app",
        Uuid::new_v4(),
        Some(Uuid::new_v4()),
        &test_oauth_config(),
    )
    .unwrap();

    let (status, _) = send(app, build_request("GET", "/", Some(&bearer(&token)), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
