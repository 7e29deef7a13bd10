/*!
 * Database module for persistent storage of users and translation records.
 *
 * This module provides SQLite-based persistence for:
 * - User credentials (`utilisateurs`)
 * - Completed translation requests (`prompts`)
 */

pub mod connection;
pub mod models;
pub mod repository;
pub mod schema;

// Re-export main types
pub use connection::DatabaseConnection;
pub use models::{TranslationDirection, TranslationRequest, User};
pub use repository::Repository;
