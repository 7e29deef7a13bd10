/*!
 * Mock backend implementations for testing.
 *
 * This module provides mock backends that simulate different behaviors:
 * - `MockBackend::working()` - Always succeeds with translated text
 * - `MockBackend::failing()` - Always fails with an error
 * - `MockBackend::slow()` - Succeeds after a delay (for cancellation tests)
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{BackendFactory, TranslationBackend};
use crate::database::models::TranslationDirection;
use crate::errors::BackendError;

/// Behavior mode for the mock backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a canned translation
    Working,
    /// Always fails with an error
    Failing,
    /// Succeeds after a delay (for timeout/cancellation testing)
    Slow {
        /// Delay before responding, in milliseconds
        delay_ms: u64,
    },
}

/// Mock backend for testing translation dispatch
#[derive(Debug)]
pub struct MockBackend {
    /// Direction this backend pretends to serve
    direction: TranslationDirection,
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of translate calls observed
    request_count: Arc<AtomicUsize>,
}

impl MockBackend {
    /// Create a new mock backend with the specified behavior
    pub fn new(direction: TranslationDirection, behavior: MockBehavior) -> Self {
        Self {
            direction,
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock backend that always succeeds
    pub fn working(direction: TranslationDirection) -> Self {
        Self::new(direction, MockBehavior::Working)
    }

    /// Create a failing mock backend that always errors
    pub fn failing(direction: TranslationDirection) -> Self {
        Self::new(direction, MockBehavior::Failing)
    }

    /// Create a slow mock backend
    pub fn slow(direction: TranslationDirection, delay_ms: u64) -> Self {
        Self::new(direction, MockBehavior::Slow { delay_ms })
    }

    /// Number of translate calls this backend has served
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Canned translation for a handful of known words, with a marked
    /// fallback so tests can still assert on the output
    fn canned_translation(&self, text: &str) -> String {
        let known = match (self.direction, text) {
            (TranslationDirection::FrToEn, "bonjour") => Some("hello"),
            (TranslationDirection::FrToEn, "merci") => Some("thank you"),
            (TranslationDirection::FrToEn, "au revoir") => Some("goodbye"),
            (TranslationDirection::EnToFr, "hello") => Some("bonjour"),
            (TranslationDirection::EnToFr, "thank you") => Some("merci"),
            (TranslationDirection::EnToFr, "goodbye") => Some("au revoir"),
            _ => None,
        };

        match known {
            Some(translation) => translation.to_string(),
            None => format!("[{}] {}", self.direction, text),
        }
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    async fn translate(&self, text: &str) -> Result<String, BackendError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(self.canned_translation(text)),
            MockBehavior::Failing => Err(BackendError::RequestFailed(
                "mock backend failure".to_string(),
            )),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
                Ok(self.canned_translation(text))
            }
        }
    }

    async fn test_connection(&self) -> Result<(), BackendError> {
        match self.behavior {
            MockBehavior::Failing => Err(BackendError::RequestFailed(
                "mock backend unreachable".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn direction(&self) -> TranslationDirection {
        self.direction
    }
}

/// Factory producing mock backends, counting constructions
///
/// The construction counter lets tests assert the selector's at-most-once
/// guarantee. An optional construction delay widens the race window for
/// concurrency tests.
pub struct MockFactory {
    /// Behavior for every backend this factory creates
    behavior: MockBehavior,
    /// Number of backends constructed
    constructions: Arc<AtomicUsize>,
    /// Artificial construction delay in milliseconds
    construction_delay_ms: u64,
}

impl MockFactory {
    /// Create a factory producing backends with the given behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            constructions: Arc::new(AtomicUsize::new(0)),
            construction_delay_ms: 0,
        }
    }

    /// Create a factory producing working backends
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a factory producing failing backends
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Add an artificial construction delay
    pub fn with_construction_delay(mut self, delay_ms: u64) -> Self {
        self.construction_delay_ms = delay_ms;
        self
    }

    /// Number of backends this factory has constructed
    pub fn constructions(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackendFactory for MockFactory {
    async fn create(
        &self,
        direction: TranslationDirection,
    ) -> Result<Arc<dyn TranslationBackend>, BackendError> {
        if self.construction_delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.construction_delay_ms))
                .await;
        }

        self.constructions.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MockBackend::new(direction, self.behavior)))
    }
}
