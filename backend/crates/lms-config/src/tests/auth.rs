use crate::Config;
use crate::tests::{EnvGuard, VALID_SECRET, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, eq, err, ok};
use serial_test::serial;

// =========================================================================
// Validation Tests - Signing Keys
// =========================================================================

#[test]
#[serial]
fn given_no_signing_key_when_validate_then_error_mentions_jwt_secret() {
    // Given
    let (_temp, _guard) = setup_config_dir();

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("jwt_secret"));
}

#[test]
#[serial]
fn given_jwt_secret_too_short_when_validate_then_error_mentions_32_chars() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secret = EnvGuard::set("LMS_AUTH_JWT_SECRET", "tooshort");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("32 characters"));
}

#[test]
#[serial]
fn given_jwt_secret_exactly_32_chars_when_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secret = EnvGuard::set("LMS_AUTH_JWT_SECRET", "12345678901234567890123456789012");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
    assert_that!(config.auth.algorithm_name(), eq("HS256"));
}

#[test]
#[serial]
fn given_only_private_key_path_when_validate_then_error_mentions_both_paths() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(temp.path().join("private.pem"), "key").unwrap();
    let _private = EnvGuard::set("LMS_AUTH_JWT_PRIVATE_KEY_PATH", "private.pem");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("set together"));
}

#[test]
#[serial]
fn given_key_pair_files_exist_when_validate_then_ok_with_rs256() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(temp.path().join("private.pem"), "private").unwrap();
    std::fs::write(temp.path().join("public.pem"), "public").unwrap();
    let _private = EnvGuard::set("LMS_AUTH_JWT_PRIVATE_KEY_PATH", "private.pem");
    let _public = EnvGuard::set("LMS_AUTH_JWT_PUBLIC_KEY_PATH", "public.pem");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
    assert_that!(config.auth.algorithm_name(), eq("RS256"));
}

#[test]
#[serial]
fn given_key_pair_file_missing_when_validate_then_error_mentions_not_found() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(temp.path().join("private.pem"), "private").unwrap();
    let _private = EnvGuard::set("LMS_AUTH_JWT_PRIVATE_KEY_PATH", "private.pem");
    let _public = EnvGuard::set("LMS_AUTH_JWT_PUBLIC_KEY_PATH", "missing.pem");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("not found"));
}

// =========================================================================
// Validation Tests - Token Lifetimes
// =========================================================================

#[test]
#[serial]
fn given_zero_access_lifetime_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secret = EnvGuard::set("LMS_AUTH_JWT_SECRET", VALID_SECRET);
    let _access = EnvGuard::set("LMS_AUTH_ACCESS_TOKEN_LIFETIME_SECS", "0");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("access_token_lifetime_secs"));
}

#[test]
#[serial]
fn given_refresh_shorter_than_access_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secret = EnvGuard::set("LMS_AUTH_JWT_SECRET", VALID_SECRET);
    let _access = EnvGuard::set("LMS_AUTH_ACCESS_TOKEN_LIFETIME_SECS", "600");
    let _refresh = EnvGuard::set("LMS_AUTH_REFRESH_TOKEN_LIFETIME_SECS", "300");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("refresh_token_lifetime_secs"));
}

#[test]
#[serial]
fn given_refresh_equal_to_access_when_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secret = EnvGuard::set("LMS_AUTH_JWT_SECRET", VALID_SECRET);
    let _access = EnvGuard::set("LMS_AUTH_ACCESS_TOKEN_LIFETIME_SECS", "600");
    let _refresh = EnvGuard::set("LMS_AUTH_REFRESH_TOKEN_LIFETIME_SECS", "600");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_leeway_above_max_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secret = EnvGuard::set("LMS_AUTH_JWT_SECRET", VALID_SECRET);
    let _leeway = EnvGuard::set("LMS_AUTH_LEEWAY_SECS", "301");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("leeway_secs"));
}
