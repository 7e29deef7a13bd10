/*!
 * # Traducteur
 *
 * A small translation backend: authenticates users against stored
 * credentials, dispatches translation requests to a direction-specific
 * Marian backend, and persists the resulting input/output pairs per user.
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `database`: SQLite persistence:
 *   - `database::connection`: Scoped connection management
 *   - `database::repository`: Credential lookups and record storage
 *   - `database::schema`: Table definitions and migrations
 * - `auth`: Credential verification
 * - `backends`: Translation capabilities:
 *   - `backends::marian`: HTTP client for Helsinki-NLP/opus-mt models
 *   - `backends::selector`: Direction-keyed backend cache
 *   - `backends::mock`: Mock backends for testing
 * - `translation_service`: Orchestration of dispatch and persistence
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod auth;
pub mod backends;
pub mod database;
pub mod errors;
pub mod translation_service;

// Re-export main types for easier usage
pub use app_config::Config;
pub use auth::CredentialVerifier;
pub use backends::{BackendSelector, MarianFactory};
pub use database::{Repository, TranslationDirection, TranslationRequest, User};
pub use errors::{
    AppError, AuthLookupError, BackendError, ConnectionError, PersistenceError, TranslationError,
};
pub use translation_service::TranslationService;
