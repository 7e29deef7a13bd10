/*!
 * End-to-end tests: authenticate, translate, record, list.
 */

use std::sync::Arc;

use crate::common::{mock_service, repository_with_user};
use traducteur::auth::CredentialVerifier;
use traducteur::backends::mock::MockFactory;
use traducteur::database::{TranslationDirection, TranslationRequest};
use traducteur::errors::{PersistenceError, TranslationError};

#[tokio::test]
async fn test_fullFlow_shouldAuthenticateTranslateAndList() {
    let (repo, _db) = repository_with_user(7, "alice", "secret");
    let verifier = CredentialVerifier::new(repo.clone());
    let (service, _) = mock_service(MockFactory::working(), repo);

    let user = verifier.verify("alice", "secret").await.unwrap();
    assert!(user.authenticated);
    let owner = user.id.unwrap();

    let request = TranslationRequest::new("bonjour", TranslationDirection::FrToEn, owner);
    let completed = service.translate_and_record(request).await.unwrap();

    assert_eq!(completed.source_text, "bonjour");
    assert_eq!(completed.translated_text.as_deref(), Some("hello"));
    assert_eq!(completed.direction, TranslationDirection::FrToEn);
    assert_eq!(completed.owner, 7);

    let history = service.history(owner).await.unwrap();
    assert_eq!(history, vec![completed]);
}

#[tokio::test]
async fn test_bothDirections_shouldRecordSeparately() {
    let (repo, _db) = repository_with_user(7, "alice", "secret");
    let (service, factory) = mock_service(MockFactory::working(), repo);

    let fr = TranslationRequest::new("bonjour", TranslationDirection::FrToEn, 7);
    let en = TranslationRequest::new("goodbye", TranslationDirection::EnToFr, 7);
    service.translate_and_record(fr).await.unwrap();
    service.translate_and_record(en).await.unwrap();

    let history = service.history(7).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].translated_text.as_deref(), Some("hello"));
    assert_eq!(history[1].translated_text.as_deref(), Some("au revoir"));

    // One backend per direction, no re-instantiation per call
    assert_eq!(factory.constructions(), 2);
}

#[tokio::test]
async fn test_backendFault_shouldLeaveNoRecord() {
    let (repo, _db) = repository_with_user(7, "alice", "secret");
    let (service, _) = mock_service(MockFactory::failing(), repo);

    let request = TranslationRequest::new("bonjour", TranslationDirection::FrToEn, 7);
    let result = service.translate_and_record(request).await;
    assert!(matches!(result, Err(TranslationError::Backend(_))));

    assert!(service.history(7).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failedInsert_shouldRollBackAndSurface() {
    let (repo, _db) = repository_with_user(7, "alice", "secret");
    let (service, _) = mock_service(MockFactory::working(), repo.clone());

    // Owner 99 has no user row; the foreign key fails the insert
    let request = TranslationRequest::new("bonjour", TranslationDirection::FrToEn, 99);
    let result = service.translate_and_record(request).await;
    assert!(matches!(
        result,
        Err(TranslationError::Persistence(PersistenceError::Insert(_)))
    ));

    // The rolled-back record is not observable for any owner
    assert!(repo.list_for_user(99).await.unwrap().is_empty());
    assert!(repo.list_for_user(7).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrentRequests_shouldAllBeRecorded() {
    let (repo, _db) = repository_with_user(7, "alice", "secret");
    let (service, factory) = mock_service(MockFactory::working(), repo);
    let service = Arc::new(service);

    let texts = ["un", "deux", "trois", "quatre", "cinq"];
    let handles: Vec<_> = texts
        .iter()
        .map(|text| {
            let service = Arc::clone(&service);
            let request = TranslationRequest::new(text, TranslationDirection::FrToEn, 7);
            tokio::spawn(async move { service.translate_and_record(request).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let history = service.history(7).await.unwrap();
    assert_eq!(history.len(), texts.len());
    assert_eq!(factory.constructions(), 1);
}

#[tokio::test]
async fn test_multipleUsers_shouldKeepHistoriesSeparate() {
    let (repo, db) = repository_with_user(7, "alice", "secret");

    // Seed a second user alongside alice
    db.execute(|conn| {
        conn.execute(
            "INSERT INTO utilisateurs (id, login, mdp) VALUES (8, 'bob', 'hunter2')",
            [],
        )
        .map_err(|e| traducteur::errors::ConnectionError::Unreachable(e.to_string()))?;
        Ok::<_, traducteur::errors::ConnectionError>(())
    })
    .unwrap();

    let (service, _) = mock_service(MockFactory::working(), repo);

    let alice_req = TranslationRequest::new("bonjour", TranslationDirection::FrToEn, 7);
    let bob_req = TranslationRequest::new("merci", TranslationDirection::FrToEn, 8);
    service.translate_and_record(alice_req).await.unwrap();
    service.translate_and_record(bob_req).await.unwrap();

    let alice_history = service.history(7).await.unwrap();
    let bob_history = service.history(8).await.unwrap();
    assert_eq!(alice_history.len(), 1);
    assert_eq!(bob_history.len(), 1);
    assert_eq!(alice_history[0].translated_text.as_deref(), Some("hello"));
    assert_eq!(bob_history[0].translated_text.as_deref(), Some("thank you"));
}
