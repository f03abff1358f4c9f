#![allow(dead_code)]

//! Test infrastructure for lms-server API tests

use lms_auth::password::hash_password;
use lms_auth::{JwtValidator, TokenIssuer, TokenLifetimes};
use lms_db::UserRepository;
use lms_server::AppState;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

pub const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";
pub const ALICE_PASSWORD: &str = "alice-password-123";

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(SqliteConnectOptions::new().filename(":memory:"))
        .await
        .expect("Failed to create test database");

    lms_db::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub fn test_issuer() -> TokenIssuer {
    TokenIssuer::with_hs256(TEST_SECRET, TokenLifetimes::default())
}

pub fn test_validator() -> JwtValidator {
    JwtValidator::with_hs256(TEST_SECRET)
}

/// AppState backed by the SQLite repository
pub async fn create_test_app_state() -> AppState {
    let pool = create_test_pool().await;
    let users = Arc::new(UserRepository::new(pool.clone()));

    AppState {
        pool,
        token_issuer: Arc::new(test_issuer()),
        jwt_validator: Arc::new(test_validator()),
        credentials: users.clone(),
        identities: users,
    }
}

/// Row inserted directly so tests control the id
pub struct TestUser<'a> {
    pub id: i64,
    pub username: &'a str,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password: &'a str,
    pub is_active: bool,
}

/// alice (id 7, a@x.com, Alice A), active
pub fn alice() -> TestUser<'static> {
    TestUser {
        id: 7,
        username: "alice",
        email: "a@x.com",
        first_name: "Alice",
        last_name: "A",
        password: ALICE_PASSWORD,
        is_active: true,
    }
}

pub async fn create_test_user(pool: &SqlitePool, user: &TestUser<'_>) {
    let hash = hash_password(user.password).expect("Failed to hash password");

    sqlx::query(
        r#"
          INSERT INTO users (id, username, email, first_name, last_name, password_hash, is_active, date_joined)
          VALUES (?, ?, ?, ?, ?, ?, ?, ?)
          "#,
    )
    .bind(user.id)
    .bind(user.username)
    .bind(user.email)
    .bind(user.first_name)
    .bind(user.last_name)
    .bind(hash)
    .bind(user.is_active)
    .bind(chrono::Utc::now().timestamp())
    .execute(pool)
    .await
    .expect("Failed to create test user");
}

pub async fn create_alice(pool: &SqlitePool) {
    create_test_user(pool, &alice()).await;
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not UTF-8")
    }
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        headers,
        body: body.to_vec(),
    }
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, request).await
}

pub async fn get_with_auth(app: Router, uri: &str, authorization: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }

    send(app, builder.body(Body::empty()).unwrap()).await
}

/// Log alice in and return (access, refresh)
pub async fn login_alice(app: Router) -> (String, String) {
    let response = post_json(
        app,
        "/api/token/",
        &format!(r#"{{"username":"alice","password":"{}"}}"#, ALICE_PASSWORD),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let json = response.json();
    (
        json["access"].as_str().unwrap().to_string(),
        json["refresh"].as_str().unwrap().to_string(),
    )
}
