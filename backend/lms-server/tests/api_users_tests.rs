//! Integration tests for the profile endpoint
mod common;

use crate::common::{
    create_alice, create_test_app_state, create_test_pool, get_with_auth, login_alice,
    test_issuer, test_validator,
};

use lms_auth::{AuthError, Claims, CredentialVerifier, IdentityResolver};
use lms_core::{ErrorLocation, User};
use lms_server::{AppState, routes::build_router};

use std::panic::Location;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{StatusCode, header};
use chrono::{Duration, Utc};
use serde_json::json;

#[tokio::test]
async fn test_profile_returns_authenticated_user() {
    let state = create_test_app_state().await;
    create_alice(&state.pool).await;
    let (access, _) = login_alice(build_router(state.clone())).await;

    let response = get_with_auth(
        build_router(state.clone()),
        "/api/users/me/",
        Some(&format!("Bearer {}", access)),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({
            "id": 7,
            "username": "alice",
            "email": "a@x.com",
            "first_name": "Alice",
            "last_name": "A",
        })
    );
}

#[tokio::test]
async fn test_profile_is_idempotent() {
    let state = create_test_app_state().await;
    create_alice(&state.pool).await;
    let (access, _) = login_alice(build_router(state.clone())).await;
    let authorization = format!("Bearer {}", access);

    let first = get_with_auth(
        build_router(state.clone()),
        "/api/users/me/",
        Some(&authorization),
    )
    .await;
    let second = get_with_auth(
        build_router(state.clone()),
        "/api/users/me/",
        Some(&authorization),
    )
    .await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body, second.body);
}

#[tokio::test]
async fn test_profile_accepts_lowercase_scheme() {
    let state = create_test_app_state().await;
    create_alice(&state.pool).await;
    let (access, _) = login_alice(build_router(state.clone())).await;

    let response = get_with_auth(
        build_router(state.clone()),
        "/api/users/me/",
        Some(&format!("bearer {}", access)),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_profile_without_authorization_returns_401() {
    let state = create_test_app_state().await;
    let app = build_router(state.clone());

    let response = get_with_auth(app, "/api/users/me/", None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers[header::WWW_AUTHENTICATE],
        "Bearer realm=\"api\""
    );
    let json = response.json();
    assert_eq!(json["error"]["code"], "NOT_AUTHENTICATED");
    assert!(json.get("username").is_none());
}

#[tokio::test]
async fn test_profile_with_basic_scheme_returns_401() {
    let state = create_test_app_state().await;
    let app = build_router(state.clone());

    let response = get_with_auth(app, "/api/users/me/", Some("Basic YWxpY2U6c2VjcmV0")).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["error"]["code"], "NOT_AUTHENTICATED");
}

#[tokio::test]
async fn test_profile_with_expired_token_returns_401_error_body_only() {
    let state = create_test_app_state().await;
    create_alice(&state.pool).await;
    let user = lms_db::UserRepository::new(state.pool.clone())
        .find_by_id(7)
        .await
        .unwrap()
        .unwrap();
    let (tokens, _) = test_issuer()
        .issue_at(&user, Utc::now() - Duration::hours(1))
        .unwrap();

    let response = get_with_auth(
        build_router(state.clone()),
        "/api/users/me/",
        Some(&format!("Bearer {}", tokens.access)),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    let json = response.json();
    assert_eq!(json.as_object().unwrap().len(), 1);
    assert_eq!(json["error"]["code"], "TOKEN_NOT_VALID");
    assert!(!response.text().contains("alice"));
}

#[tokio::test]
async fn test_profile_with_tampered_token_returns_401() {
    let state = create_test_app_state().await;
    create_alice(&state.pool).await;
    let (access, _) = login_alice(build_router(state.clone())).await;

    // Change the first character of the signature
    let signature_start = access.rfind('.').unwrap() + 1;
    let first = &access[signature_start..signature_start + 1];
    let tampered = format!(
        "{}{}{}",
        &access[..signature_start],
        if first == "A" { "B" } else { "A" },
        &access[signature_start + 1..]
    );

    let response = get_with_auth(
        build_router(state.clone()),
        "/api/users/me/",
        Some(&format!("Bearer {}", tampered)),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    let json = response.json();
    assert_eq!(json["error"]["code"], "TOKEN_NOT_VALID");
    assert!(!response.text().contains("alice"));
}

#[tokio::test]
async fn test_profile_with_refresh_token_returns_401() {
    let state = create_test_app_state().await;
    create_alice(&state.pool).await;
    let (_, refresh) = login_alice(build_router(state.clone())).await;

    let response = get_with_auth(
        build_router(state.clone()),
        "/api/users/me/",
        Some(&format!("Bearer {}", refresh)),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["error"]["code"], "TOKEN_NOT_VALID");
}

#[tokio::test]
async fn test_profile_for_deleted_user_returns_401() {
    let state = create_test_app_state().await;
    create_alice(&state.pool).await;
    let (access, _) = login_alice(build_router(state.clone())).await;
    sqlx::query("DELETE FROM users WHERE id = 7")
        .execute(&state.pool)
        .await
        .unwrap();

    let response = get_with_auth(
        build_router(state.clone()),
        "/api/users/me/",
        Some(&format!("Bearer {}", access)),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["error"]["code"], "USER_NOT_FOUND");
}

struct FailingStore;

#[async_trait]
impl CredentialVerifier for FailingStore {
    async fn verify_credentials(&self, _: &str, _: &str) -> lms_auth::Result<User> {
        Err(AuthError::Store {
            message: "connection refused".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

#[async_trait]
impl IdentityResolver for FailingStore {
    async fn resolve_identity(&self, _: &Claims) -> lms_auth::Result<User> {
        Err(AuthError::Store {
            message: "connection refused".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

#[tokio::test]
async fn test_profile_when_store_fails_returns_500_without_details() {
    let store = Arc::new(FailingStore);
    let state = AppState {
        pool: create_test_pool().await,
        token_issuer: Arc::new(test_issuer()),
        jwt_validator: Arc::new(test_validator()),
        credentials: store.clone(),
        identities: store,
    };
    let claims = lms_auth::base_claims(
        7,
        lms_auth::TokenType::Refresh,
        Duration::days(1),
        Utc::now(),
    );
    let (access, _) = test_issuer().access_from_refresh(&claims).unwrap();

    let response = get_with_auth(
        build_router(state),
        "/api/users/me/",
        Some(&format!("Bearer {}", access)),
    )
    .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let json = response.json();
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert!(!response.text().contains("connection refused"));
}
