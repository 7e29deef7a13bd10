/*!
 * Unit tests for the backend selector cache.
 */

use std::sync::Arc;

use traducteur::backends::mock::MockFactory;
use traducteur::backends::BackendSelector;
use traducteur::database::TranslationDirection;
use traducteur::errors::TranslationError;

#[tokio::test]
async fn test_selector_shouldReturnSameInstanceAfterFirstCall() {
    let factory = Arc::new(MockFactory::working());
    let selector = BackendSelector::new(factory.clone());

    let first = selector.backend(TranslationDirection::EnToFr).await.unwrap();
    for _ in 0..5 {
        let again = selector.backend(TranslationDirection::EnToFr).await.unwrap();
        assert!(Arc::ptr_eq(&first, &again));
    }
    assert_eq!(factory.constructions(), 1);
}

#[tokio::test]
async fn test_selector_underConcurrency_shouldConstructOnce() {
    let factory = Arc::new(MockFactory::working().with_construction_delay(30));
    let selector = Arc::new(BackendSelector::new(factory.clone()));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let selector = Arc::clone(&selector);
            tokio::spawn(async move { selector.backend(TranslationDirection::FrToEn).await })
        })
        .collect();

    let mut backends = Vec::new();
    for handle in handles {
        backends.push(handle.await.unwrap().unwrap());
    }

    assert_eq!(factory.constructions(), 1);
    for backend in &backends[1..] {
        assert!(Arc::ptr_eq(&backends[0], backend));
    }
}

#[tokio::test]
async fn test_selector_withUnknownTag_shouldRejectWithoutConstructing() {
    let factory = Arc::new(MockFactory::working());
    let selector = BackendSelector::new(factory.clone());

    for tag in ["de>>en", "fr>>de", "", "fr-en", "FR>>EN"] {
        let result = selector.backend_for_tag(tag).await;
        assert!(
            matches!(result, Err(TranslationError::UnsupportedDirection(_))),
            "tag '{}' was not rejected",
            tag
        );
    }

    assert_eq!(factory.constructions(), 0);
}
