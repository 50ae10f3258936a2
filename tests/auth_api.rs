//! HTTP-level tests for the auth endpoints

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use chrono::{Duration, Utc};
use notesapp::api::auth::{TokenResponse, ValidateResponse};
use notesapp::api::{self, AppState};
use notesapp::db::create_test_pool;
use notesapp::services::TokenIssuer;
use serde_json::{json, Value};

const SECRET: &[u8] = b"auth-api-secret";

async fn setup_server() -> TestServer {
    let db = create_test_pool().await.expect("Failed to create test pool");
    let state = AppState::init(db, TokenIssuer::new(SECRET))
        .await
        .expect("Failed to init state");
    let app = api::build_router(state, "http://localhost:3000").expect("Failed to build router");
    TestServer::new(app).expect("Failed to start test server")
}

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

async fn register(server: &TestServer, username: &str, password: &str) {
    server
        .post("/auth/register")
        .json(&json!({"username": username, "password": password}))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_register_login_validate_flow() {
    let server = setup_server().await;
    register(&server, "alice", "hunter22").await;

    let response = server
        .post("/auth/login")
        .json(&json!({"username": "alice", "password": "hunter22"}))
        .await;
    response.assert_status_ok();
    let TokenResponse { token } = response.json();

    let response = server
        .get("/auth/validate")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;
    response.assert_status_ok();
    let ValidateResponse { username } = response.json();
    assert_eq!(username, "alice");
}

#[tokio::test]
async fn test_duplicate_registration_is_conflict() {
    let server = setup_server().await;
    register(&server, "alice", "one").await;

    let response = server
        .post("/auth/register")
        .json(&json!({"username": "alice", "password": "two"}))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_missing_password_is_400() {
    let server = setup_server().await;

    server
        .post("/auth/register")
        .json(&json!({"username": "alice"}))
        .await
        .assert_status_bad_request();
    server
        .post("/auth/register")
        .text("garbage")
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let server = setup_server().await;
    register(&server, "alice", "hunter22").await;

    let wrong_password = server
        .post("/auth/login")
        .json(&json!({"username": "alice", "password": "nope"}))
        .await;
    let unknown_user = server
        .post("/auth/login")
        .json(&json!({"username": "mallory", "password": "hunter22"}))
        .await;

    wrong_password.assert_status_unauthorized();
    unknown_user.assert_status_unauthorized();
    assert_eq!(wrong_password.json::<Value>(), unknown_user.json::<Value>());
}

#[tokio::test]
async fn test_validate_rejects_missing_expired_and_foreign_tokens() {
    let server = setup_server().await;

    server.get("/auth/validate").await.assert_status_unauthorized();

    let expired = TokenIssuer::new(SECRET)
        .issue_at("alice", Utc::now() - Duration::hours(25))
        .unwrap();
    server
        .get("/auth/validate")
        .add_header(header::AUTHORIZATION, bearer(&expired))
        .await
        .assert_status_unauthorized();

    let foreign = TokenIssuer::new(b"not-our-secret").issue("alice").unwrap();
    server
        .get("/auth/validate")
        .add_header(header::AUTHORIZATION, bearer(&foreign))
        .await
        .assert_status_unauthorized();
}
