/*!
 * Translation orchestration.
 *
 * Ties backend selection to record persistence for a single request:
 * dispatch always precedes persistence, so no record is ever stored before
 * its translation is known, and a faulting backend leaves no partial row.
 */

use log::{debug, info};
use std::sync::Arc;

use crate::backends::{BackendFactory, BackendSelector};
use crate::database::models::TranslationRequest;
use crate::database::repository::Repository;
use crate::errors::{PersistenceError, TranslationError};

/// Orchestrates translation dispatch and persistence
pub struct TranslationService {
    /// Direction-keyed backend cache
    selector: BackendSelector,
    /// Record store
    repository: Repository,
}

impl TranslationService {
    /// Create a service over the given factory and repository
    pub fn new(factory: Arc<dyn BackendFactory>, repository: Repository) -> Self {
        Self {
            selector: BackendSelector::new(factory),
            repository,
        }
    }

    /// The backend selector, for callers that only need dispatch
    pub fn selector(&self) -> &BackendSelector {
        &self.selector
    }

    /// Translate a request and persist the completed record
    ///
    /// An unsupported direction or a backend fault propagates without
    /// touching persistence; only a fully completed translation is saved.
    pub async fn translate_and_record(
        &self,
        request: TranslationRequest,
    ) -> Result<TranslationRequest, TranslationError> {
        let backend = self.selector.backend(request.direction).await?;

        debug!(
            "Translating {} characters for user {} ({})",
            request.source_text.len(),
            request.owner,
            request.direction
        );

        let translated = backend.translate(&request.source_text).await?;
        let completed = request.complete(translated);

        self.repository.save_prompt(&completed).await?;

        info!(
            "Recorded {} translation for user {}",
            completed.direction, completed.owner
        );
        Ok(completed)
    }

    /// List all stored translations for a user, in insertion order
    pub async fn history(
        &self,
        owner: i64,
    ) -> Result<Vec<TranslationRequest>, PersistenceError> {
        self.repository.list_for_user(owner).await
    }
}
