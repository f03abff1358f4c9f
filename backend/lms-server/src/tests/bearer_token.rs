use crate::api::extractors::authenticated_user::bearer_token;

use lms_auth::AuthError;

use axum::http::{HeaderMap, HeaderValue, header};
use googletest::assert_that;
use googletest::prelude::{anything, eq, ok};

fn headers_with(value: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
    headers
}

#[test]
fn given_bearer_header_when_parsed_then_returns_token() {
    // Given
    let headers = headers_with("Bearer abc.def.ghi");

    // When
    let result = bearer_token(&headers);

    // Then
    assert_that!(result, ok(anything()));
    assert_that!(result.unwrap(), eq("abc.def.ghi"));
}

#[test]
fn given_lowercase_scheme_when_parsed_then_accepted() {
    // Given
    let headers = headers_with("bearer abc");

    // When
    let result = bearer_token(&headers);

    // Then
    assert_that!(result.unwrap(), eq("abc"));
}

#[test]
fn given_no_header_when_parsed_then_missing_header() {
    // Given
    let headers = HeaderMap::new();

    // When
    let result = bearer_token(&headers);

    // Then
    assert!(matches!(result, Err(AuthError::MissingHeader { .. })));
}

#[test]
fn given_basic_scheme_when_parsed_then_invalid_scheme() {
    // Given
    let headers = headers_with("Basic YWxpY2U6c2VjcmV0");

    // When
    let result = bearer_token(&headers);

    // Then
    assert!(matches!(result, Err(AuthError::InvalidScheme { .. })));
}

#[test]
fn given_scheme_without_token_when_parsed_then_invalid_token() {
    // Given
    let headers = headers_with("Bearer");

    // When
    let result = bearer_token(&headers);

    // Then
    assert!(matches!(result, Err(AuthError::InvalidToken { .. })));
}

#[test]
fn given_token_with_spaces_when_parsed_then_invalid_token() {
    // Given
    let headers = headers_with("Bearer abc def");

    // When
    let result = bearer_token(&headers);

    // Then
    assert!(matches!(result, Err(AuthError::InvalidToken { .. })));
}
