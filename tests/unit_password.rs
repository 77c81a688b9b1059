use mbkm_core::{PasswordError, hash_password, verify_password};

#[test]
fn test_hash_password_success() {
    let password = "testpassword123";
    let hash = hash_password(password).unwrap();

    assert!(!hash.is_empty());
    assert_ne!(hash, password);
}

#[test]
fn test_hashes_are_salted() {
    let first = hash_password("samepassword").unwrap();
    let second = hash_password("samepassword").unwrap();

    assert_ne!(first, second);
    assert!(verify_password("samepassword", &first).is_ok());
    assert!(verify_password("samepassword", &second).is_ok());
}

#[test]
fn test_verify_password_incorrect() {
    let hash = hash_password("correctpassword").unwrap();

    let result = verify_password("wrongpassword", &hash);
    assert!(matches!(result, Err(PasswordError::Mismatch)));
}
