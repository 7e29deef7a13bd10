/*!
 * Unit tests for the credential verifier.
 */

use crate::common::repository_with_user;
use traducteur::auth::CredentialVerifier;

#[tokio::test]
async fn test_verify_withStoredCredentials_shouldPopulateId() {
    let (repo, _db) = repository_with_user(7, "alice", "secret");
    let verifier = CredentialVerifier::new(repo);

    let user = verifier.verify("alice", "secret").await.unwrap();
    assert!(user.authenticated);
    assert_eq!(user.id, Some(7));
    assert_eq!(user.login, "alice");
}

#[tokio::test]
async fn test_verify_withWrongPassword_shouldDenyWithoutError() {
    let (repo, _db) = repository_with_user(7, "alice", "secret");
    let verifier = CredentialVerifier::new(repo);

    let user = verifier.verify("alice", "wrong").await.unwrap();
    assert!(!user.authenticated);
    assert_eq!(user.id, None);
}

#[tokio::test]
async fn test_verify_withUnknownLogin_shouldDenyWithoutError() {
    let (repo, _db) = repository_with_user(7, "alice", "secret");
    let verifier = CredentialVerifier::new(repo);

    let user = verifier.verify("bob", "secret").await.unwrap();
    assert!(!user.authenticated);
}

#[tokio::test]
async fn test_verify_withInjectionAttempt_shouldDenyWithoutError() {
    let (repo, _db) = repository_with_user(7, "alice", "secret");
    let verifier = CredentialVerifier::new(repo);

    // Parameterized queries treat this as a literal password
    let user = verifier
        .verify("alice", "' OR '1'='1")
        .await
        .expect("Lookup itself must not fault");
    assert!(!user.authenticated);
}
