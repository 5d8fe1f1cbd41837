use microtrack::microtrack_core::password::MAX_PASSWORD_BYTES;
use microtrack::microtrack_core::{hash_password_with_cost, verify_password};

const TEST_COST: u32 = 4;

#[test]
fn test_hash_password_success() {
    let password = "testpassword123";
    let hash = hash_password_with_cost(password, TEST_COST).unwrap();

    assert!(!hash.is_empty());
    assert_ne!(hash, password);
    assert!(hash.starts_with("$2b$04$"));
}

#[test]
fn test_hash_password_empty() {
    assert!(hash_password_with_cost("", TEST_COST).is_ok());
}

#[test]
fn test_verify_password_correct() {
    let hash = hash_password_with_cost("correctpassword", TEST_COST).unwrap();
    assert!(verify_password("correctpassword", &hash).unwrap());
}

#[test]
fn test_verify_password_incorrect() {
    let hash = hash_password_with_cost("correctpassword", TEST_COST).unwrap();
    assert!(!verify_password("wrongpassword", &hash).unwrap());
}

#[test]
fn test_verify_password_invalid_hash() {
    let result = verify_password("testpassword", "not_a_valid_bcrypt_hash");
    assert!(result.is_err());
}

#[test]
fn test_hash_generates_unique_hashes() {
    let hash1 = hash_password_with_cost("samepassword", TEST_COST).unwrap();
    let hash2 = hash_password_with_cost("samepassword", TEST_COST).unwrap();

    assert_ne!(hash1, hash2);
    assert!(verify_password("samepassword", &hash1).unwrap());
    assert!(verify_password("samepassword", &hash2).unwrap());
}

#[test]
fn test_password_length_limit() {
    let at_limit = "a".repeat(MAX_PASSWORD_BYTES);
    let hash = hash_password_with_cost(&at_limit, TEST_COST).unwrap();
    assert!(verify_password(&at_limit, &hash).unwrap());

    let too_long = "a".repeat(MAX_PASSWORD_BYTES + 1);
    let err = hash_password_with_cost(&too_long, TEST_COST).unwrap_err();
    assert_eq!(err.status.as_u16(), 400);

    // bcrypt would otherwise compare only the first 72 bytes
    assert!(!verify_password(&too_long, &hash).unwrap());
}

#[test]
fn test_unicode_password() {
    let password = "pässwörd-密码-🌱";
    let hash = hash_password_with_cost(password, TEST_COST).unwrap();
    assert!(verify_password(password, &hash).unwrap());
    assert!(!verify_password("passwoerd", &hash).unwrap());
}
