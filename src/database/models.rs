/*!
 * Domain entity models.
 *
 * These structures map to the `utilisateurs` and `prompts` tables and
 * provide type-safe access to persisted data.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::TranslationError;

/// Wire tag for the French-to-English direction
pub const DIRECTION_FR_TO_EN: &str = "fr>>en";

/// Wire tag for the English-to-French direction
pub const DIRECTION_EN_TO_FR: &str = "en>>fr";

/// Translation direction enumeration
///
/// Closed set: every stored or requested record carries exactly one of
/// these two values. The string tags above are the only accepted external
/// representation; anything else is rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationDirection {
    /// French to English
    FrToEn,
    /// English to French
    EnToFr,
}

impl TranslationDirection {
    /// The wire tag stored in the `version` column
    pub fn tag(&self) -> &'static str {
        match self {
            TranslationDirection::FrToEn => DIRECTION_FR_TO_EN,
            TranslationDirection::EnToFr => DIRECTION_EN_TO_FR,
        }
    }

    /// All supported directions
    pub fn all() -> [TranslationDirection; 2] {
        [TranslationDirection::FrToEn, TranslationDirection::EnToFr]
    }
}

impl fmt::Display for TranslationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl std::str::FromStr for TranslationDirection {
    type Err = TranslationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            DIRECTION_FR_TO_EN => Ok(TranslationDirection::FrToEn),
            DIRECTION_EN_TO_FR => Ok(TranslationDirection::EnToFr),
            other => Err(TranslationError::UnsupportedDirection(other.to_string())),
        }
    }
}

/// A user of the translation service
///
/// Identity is the `login`; `id` is populated by the store only after a
/// successful credential check. `authenticated` starts false and is set
/// true exclusively by the credential verifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Row id in `utilisateurs`, assigned after verification
    pub id: Option<i64>,
    /// Login name
    pub login: String,
    /// Password as stored
    pub password: String,
    /// Whether this user passed credential verification
    pub authenticated: bool,
}

impl User {
    /// Create an unauthenticated user from raw credentials
    pub fn new(login: &str, password: &str) -> Self {
        Self {
            id: None,
            login: login.to_string(),
            password: password.to_string(),
            authenticated: false,
        }
    }
}

/// A translation request and, once dispatched, its result
///
/// `translated_text` is absent until the orchestrator completes dispatch;
/// once set it is never modified again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Text to translate
    pub source_text: String,
    /// Completed translation, absent while dispatch is pending
    pub translated_text: Option<String>,
    /// Requested direction
    pub direction: TranslationDirection,
    /// Id of the owning user (`utilisateurs.id`)
    pub owner: i64,
}

impl TranslationRequest {
    /// Create a pending request
    pub fn new(source_text: &str, direction: TranslationDirection, owner: i64) -> Self {
        Self {
            source_text: source_text.to_string(),
            translated_text: None,
            direction,
            owner,
        }
    }

    /// Complete the request with its translation
    pub fn complete(mut self, translated_text: String) -> Self {
        self.translated_text = Some(translated_text);
        self
    }

    /// Whether the request carries a non-empty translation
    pub fn is_complete(&self) -> bool {
        self.translated_text
            .as_deref()
            .is_some_and(|t| !t.is_empty())
    }
}
