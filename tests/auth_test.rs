///! Integration tests for access-token minting/validation and password
///! hashing.
///!
///! Tokens are minted locally with the same HS256 secret the server would
///! use, then checked through `validate_token`. No running server or
///! database is needed.
///!
///! Run with: `cargo test --test auth_test`
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use servihub_backend::auth::jwt::{Claims, create_token, validate_token};
use servihub_backend::auth::password;

/// A fake secret for testing, never the real one.
const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

#[test]
fn test_valid_token_roundtrip() {
    let user_id = Uuid::new_v4();
    let token = create_token(user_id, TEST_SECRET, 24).expect("Failed to mint token");

    let claims = validate_token(&token, TEST_SECRET).expect("Token should be valid");

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.user_id().unwrap(), user_id);
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_expired_token_is_rejected() {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        exp: now - 300, // expired 5 minutes ago (well past the 60s default leeway)
        iat: now - 3600,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let result = validate_token(&token, TEST_SECRET);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("ExpiredSignature"));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let token = create_token(Uuid::new_v4(), TEST_SECRET, 24).unwrap();

    let result = validate_token(&token, "completely-wrong-secret-xxxxxxxxxxxxxxxxxxx");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("InvalidSignature"));
}

#[test]
fn test_garbage_token_is_rejected() {
    let result = validate_token("not.a.valid.jwt", TEST_SECRET);
    assert!(result.is_err());
}

#[test]
fn test_non_uuid_subject_is_rejected() {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: "not-a-uuid".to_string(),
        exp: now + 3600,
        iat: now,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    // The signature checks out, but the subject is not a user id.
    let decoded = validate_token(&token, TEST_SECRET).expect("Signature should be valid");
    assert!(decoded.user_id().is_err());
}

#[test]
fn test_password_hash_and_verify() {
    let hash = password::hash("hunter2-but-longer").expect("Hashing should succeed");

    assert!(hash.starts_with("$argon2"));
    assert!(password::verify("hunter2-but-longer", &hash));
    assert!(!password::verify("wrong-password", &hash));
}

#[test]
fn test_same_password_hashes_differently() {
    let first = password::hash("repeat-after-me").unwrap();
    let second = password::hash("repeat-after-me").unwrap();

    // Fresh salt per call.
    assert_ne!(first, second);
    assert!(password::verify("repeat-after-me", &first));
    assert!(password::verify("repeat-after-me", &second));
}

#[test]
fn test_unparseable_stored_hash_fails_closed() {
    assert!(!password::verify("anything", "not-a-phc-string"));
    assert!(!password::verify("anything", ""));
}
