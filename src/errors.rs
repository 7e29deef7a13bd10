/*!
 * Error types for the traducteur backend.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 *
 * The taxonomy distinguishes faults that callers must react to differently:
 * a failed credential lookup is not a denied login, and a failed listing is
 * not an empty history. No layer prints-and-continues; every fault is
 * returned to the component that decides whether to retry or abort.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors raised by the connection scope: the store itself is unusable.
///
/// These are fatal to the enclosing operation and are never retried
/// internally.
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// The database could not be opened or reached
    #[error("Database unreachable: {0}")]
    Unreachable(String),

    /// The connection lock was poisoned by a panicking holder
    #[error("Database lock poisoned: {0}")]
    LockPoisoned(String),

    /// The blocking database task panicked before completing
    #[error("Database task panicked: {0}")]
    TaskPanicked(String),
}

/// Errors raised while checking credentials.
///
/// A non-matching login/password pair is NOT an error - the verifier
/// returns an unauthenticated `User` for that case. This type only covers
/// faults of the lookup itself.
#[derive(Error, Debug)]
pub enum AuthLookupError {
    /// The store was unreachable during the lookup
    #[error("Connection error during credential lookup: {0}")]
    Connection(#[from] ConnectionError),

    /// The credential query itself failed
    #[error("Credential query failed: {0}")]
    Query(String),
}

/// Errors raised by the translation backend capability.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Error when making a request to the inference server fails
    #[error("Backend request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing a backend response fails
    #[error("Failed to parse backend response: {0}")]
    ParseError(String),

    /// Error returned by the inference server itself
    #[error("Backend responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the server
        message: String,
    },

    /// Error constructing the backend client
    #[error("Backend construction failed: {0}")]
    Construction(String),
}

/// Errors raised by the translation record store.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The store was unreachable
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// The insert failed; the transaction was rolled back
    #[error("Failed to persist translation record: {0}")]
    Insert(String),

    /// The select failed; distinct from an empty result set
    #[error("Failed to load translation records: {0}")]
    Select(String),

    /// The record was rejected before any row was written
    #[error("Refusing to persist incomplete record: {0}")]
    IncompleteRecord(String),
}

/// Errors raised while orchestrating a translation request.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The requested direction tag is outside the closed enumeration.
    /// This is a programming/input error, not a retryable condition.
    #[error("Unsupported translation direction: {0}")]
    UnsupportedDirection(String),

    /// The external translation capability faulted; nothing was persisted
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// The completed translation could not be persisted
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error loading or validating configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the connection scope
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// Error from the credential verifier
    #[error("Authentication lookup error: {0}")]
    Auth(#[from] AuthLookupError),

    /// Error from the record store
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Error from translation dispatch
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Config(error.to_string())
    }
}
