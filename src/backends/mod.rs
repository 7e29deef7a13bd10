/*!
 * Translation backend implementations.
 *
 * This module contains the capability seam for actual text translation:
 * - `marian`: HTTP client for Helsinki-NLP/opus-mt Marian models
 * - `mock`: mock backends for testing
 * - `selector`: direction-keyed backend cache with at-most-once construction
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use crate::database::models::TranslationDirection;
use crate::errors::BackendError;

/// Common trait for all translation backends
///
/// A backend is an opaque capability for exactly one direction; failure
/// modes and latency of the underlying model are not this crate's concern.
#[async_trait]
pub trait TranslationBackend: Send + Sync + Debug {
    /// Translate a single text
    async fn translate(&self, text: &str) -> Result<String, BackendError>;

    /// Test the connection to the backend
    async fn test_connection(&self) -> Result<(), BackendError>;

    /// The direction this backend serves
    fn direction(&self) -> TranslationDirection;
}

/// Factory for constructing direction-specific backends
///
/// Only the selector invokes this; no other component constructs backends
/// directly. Construction is assumed expensive, which is why the selector
/// caches the result per direction.
#[async_trait]
pub trait BackendFactory: Send + Sync {
    /// Construct a backend for the given direction
    async fn create(
        &self,
        direction: TranslationDirection,
    ) -> Result<Arc<dyn TranslationBackend>, BackendError>;
}

pub mod marian;
pub mod mock;
pub mod selector;

pub use marian::{MarianBackend, MarianFactory};
pub use selector::BackendSelector;
