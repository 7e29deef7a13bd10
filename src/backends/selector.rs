/*!
 * Direction-keyed backend selection and caching.
 *
 * Backend construction (model load on the inference side, client setup on
 * ours) is expensive, so the selector builds each backend at most once per
 * process lifetime and hands out the same instance afterwards. Concurrent
 * first-time callers for a direction await a single in-flight construction;
 * steady-state hits are plain reads that do not serialize against each
 * other.
 */

use log::debug;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::{BackendFactory, TranslationBackend};
use crate::database::models::TranslationDirection;
use crate::errors::TranslationError;

/// Direction-keyed cache of translation backends
pub struct BackendSelector {
    /// Factory constructing backends on first use
    factory: Arc<dyn BackendFactory>,
    /// Cached French-to-English backend
    fr_to_en: OnceCell<Arc<dyn TranslationBackend>>,
    /// Cached English-to-French backend
    en_to_fr: OnceCell<Arc<dyn TranslationBackend>>,
    /// Cache hit counter
    hits: RwLock<usize>,
    /// Cache miss counter
    misses: RwLock<usize>,
}

impl BackendSelector {
    /// Create a selector over the given factory
    ///
    /// No backend is constructed here; construction is deferred to the
    /// first request per direction.
    pub fn new(factory: Arc<dyn BackendFactory>) -> Self {
        Self {
            factory,
            fr_to_en: OnceCell::new(),
            en_to_fr: OnceCell::new(),
            hits: RwLock::new(0),
            misses: RwLock::new(0),
        }
    }

    /// The cache cell serving a direction
    fn cell(&self, direction: TranslationDirection) -> &OnceCell<Arc<dyn TranslationBackend>> {
        match direction {
            TranslationDirection::FrToEn => &self.fr_to_en,
            TranslationDirection::EnToFr => &self.en_to_fr,
        }
    }

    /// Get the backend for a direction, constructing it on first use
    ///
    /// The `OnceCell` guarantees at most one in-flight construction per
    /// direction; every concurrent caller observes the same completed
    /// instance. A failed construction leaves the cell empty, so a later
    /// call retries.
    pub async fn backend(
        &self,
        direction: TranslationDirection,
    ) -> Result<Arc<dyn TranslationBackend>, TranslationError> {
        let cell = self.cell(direction);

        if let Some(backend) = cell.get() {
            *self.hits.write() += 1;
            debug!("Backend cache hit for {}", direction);
            return Ok(Arc::clone(backend));
        }

        *self.misses.write() += 1;
        debug!("Backend cache miss for {}, constructing", direction);

        let backend = cell
            .get_or_try_init(|| self.factory.create(direction))
            .await
            .map_err(TranslationError::Backend)?;

        Ok(Arc::clone(backend))
    }

    /// Get the backend for a raw direction tag
    ///
    /// This is the validation boundary for externally supplied tags: any
    /// value outside the closed enumeration fails with
    /// `UnsupportedDirection` and constructs nothing.
    pub async fn backend_for_tag(
        &self,
        tag: &str,
    ) -> Result<Arc<dyn TranslationBackend>, TranslationError> {
        let direction: TranslationDirection = tag.parse()?;
        self.backend(direction).await
    }

    /// Get cache statistics as (hits, misses, hit_rate)
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = *self.hits.read();
        let misses = *self.misses.read();
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        (hits, misses, hit_rate)
    }
}
