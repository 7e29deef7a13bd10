/*!
 * Marian translation backend.
 *
 * HTTP client for an inference server hosting the Helsinki-NLP/opus-mt
 * Marian models, one model per translation direction.
 */

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::{BackendFactory, TranslationBackend};
use crate::app_config::BackendConfig;
use crate::database::models::TranslationDirection;
use crate::errors::BackendError;

/// Model identifier for the French-to-English Marian model
pub const MODEL_FR_TO_EN: &str = "Helsinki-NLP/opus-mt-fr-en";

/// Model identifier for the English-to-French Marian model
pub const MODEL_EN_TO_FR: &str = "Helsinki-NLP/opus-mt-en-fr";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Translation request body for the inference server
#[derive(Debug, Serialize)]
struct TranslationRequestBody {
    /// Text to translate
    inputs: String,
}

/// One translation result from the inference server
#[derive(Debug, Deserialize)]
struct TranslationResponseBody {
    /// Translated text
    translation_text: String,
}

/// Marian client for one translation direction
pub struct MarianBackend {
    /// Base URL of the inference server
    base_url: Url,
    /// Model identifier served for this direction
    model: String,
    /// Direction this backend serves
    direction: TranslationDirection,
    /// HTTP client for making requests
    client: Client,
}

impl std::fmt::Debug for MarianBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarianBackend")
            .field("base_url", &self.base_url.as_str())
            .field("model", &self.model)
            .field("direction", &self.direction)
            .finish()
    }
}

impl MarianBackend {
    /// Create a backend for the given direction
    pub fn new(
        endpoint: &str,
        direction: TranslationDirection,
        timeout_secs: Option<u64>,
    ) -> Result<Self, BackendError> {
        let base_url = Url::parse(endpoint)
            .map_err(|e| BackendError::Construction(format!("invalid endpoint '{}': {}", endpoint, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)))
            .build()
            .map_err(|e| BackendError::Construction(e.to_string()))?;

        Ok(Self {
            base_url,
            model: Self::model_for(direction).to_string(),
            direction,
            client,
        })
    }

    /// The Marian model identifier serving a direction
    pub fn model_for(direction: TranslationDirection) -> &'static str {
        match direction {
            TranslationDirection::FrToEn => MODEL_FR_TO_EN,
            TranslationDirection::EnToFr => MODEL_EN_TO_FR,
        }
    }

    /// The model identifier this backend targets
    pub fn model(&self) -> &str {
        &self.model
    }

    /// URL of the model endpoint on the inference server
    fn model_url(&self) -> Result<Url, BackendError> {
        self.base_url
            .join(&format!("models/{}", self.model))
            .map_err(|e| BackendError::RequestFailed(e.to_string()))
    }
}

#[async_trait]
impl TranslationBackend for MarianBackend {
    async fn translate(&self, text: &str) -> Result<String, BackendError> {
        let url = self.model_url()?;
        let body = TranslationRequestBody {
            inputs: text.to_string(),
        };

        debug!("Dispatching {} translation to {}", self.direction, url);

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Inference server returned {}: {}", status, message);
            return Err(BackendError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        // The server answers with one result per input; we send one input
        let results: Vec<TranslationResponseBody> = response
            .json()
            .await
            .map_err(|e| BackendError::ParseError(e.to_string()))?;

        results
            .into_iter()
            .next()
            .map(|r| r.translation_text)
            .ok_or_else(|| BackendError::ParseError("empty translation result".to_string()))
    }

    async fn test_connection(&self) -> Result<(), BackendError> {
        let response = self
            .client
            .get(self.base_url.clone())
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(BackendError::ApiError {
                status_code: status.as_u16(),
                message: "inference server health check failed".to_string(),
            })
        }
    }

    fn direction(&self) -> TranslationDirection {
        self.direction
    }
}

/// Factory producing Marian backends from the application configuration
pub struct MarianFactory {
    /// Backend section of the application configuration
    config: BackendConfig,
}

impl MarianFactory {
    /// Create a factory over the given backend configuration
    pub fn new(config: BackendConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl BackendFactory for MarianFactory {
    async fn create(
        &self,
        direction: TranslationDirection,
    ) -> Result<Arc<dyn TranslationBackend>, BackendError> {
        let backend = MarianBackend::new(
            &self.config.endpoint,
            direction,
            Some(self.config.timeout_secs),
        )?;
        Ok(Arc::new(backend))
    }
}
