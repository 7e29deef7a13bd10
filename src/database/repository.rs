/*!
 * Repository layer for database operations.
 *
 * This module provides a high-level API for credential lookups and
 * translation record persistence, abstracting away the SQL details.
 * All queries are parameterized; nothing is string-concatenated.
 */

use log::debug;
use rusqlite::{params, OptionalExtension};

use super::connection::DatabaseConnection;
use super::models::{TranslationRequest, User};
use crate::errors::{AuthLookupError, ConnectionError, PersistenceError};

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> Result<Self, ConnectionError> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self, ConnectionError> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    // =========================================================================
    // User Operations
    // =========================================================================

    /// Insert a user and return the assigned id
    pub async fn insert_user(&self, login: &str, password: &str) -> Result<i64, PersistenceError> {
        let login = login.to_string();
        let password = password.to_string();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    "INSERT INTO utilisateurs (login, mdp) VALUES (?1, ?2)",
                    params![login, password],
                )
                .map_err(|e| PersistenceError::Insert(e.to_string()))?;
                Ok(conn.last_insert_rowid())
            })
            .await
    }

    /// Check a login/password pair against stored records
    ///
    /// A matching row yields a `User` with `id` populated and
    /// `authenticated = true`. No matching row yields `authenticated =
    /// false` without an error: a denied login is a legitimate outcome,
    /// not a fault. Only lookup failures surface as `AuthLookupError`.
    pub async fn verify_login(
        &self,
        login: &str,
        password: &str,
    ) -> Result<User, AuthLookupError> {
        let login = login.to_string();
        let password = password.to_string();

        self.db
            .execute_async(move |conn| {
                let row = conn
                    .query_row(
                        "SELECT id, login, mdp FROM utilisateurs WHERE login = ?1 AND mdp = ?2",
                        params![login, password],
                        |row| {
                            Ok((
                                row.get::<_, i64>(0)?,
                                row.get::<_, String>(1)?,
                                row.get::<_, String>(2)?,
                            ))
                        },
                    )
                    .optional()
                    .map_err(|e| AuthLookupError::Query(e.to_string()))?;

                let user = match row {
                    Some((id, login, password)) => {
                        debug!("Credentials matched for user id {}", id);
                        User {
                            id: Some(id),
                            login,
                            password,
                            authenticated: true,
                        }
                    }
                    None => {
                        debug!("Credentials did not match for login '{}'", login);
                        User::new(&login, &password)
                    }
                };

                Ok(user)
            })
            .await
    }

    // =========================================================================
    // Translation Record Operations
    // =========================================================================

    /// Persist a completed translation request
    ///
    /// The insert runs inside a transaction; on any failure the transaction
    /// is rolled back before the connection scope is released and the fault
    /// surfaces as `PersistenceError`. A request with an empty source text,
    /// or whose translation is still pending (or empty), is rejected before
    /// any row is written.
    pub async fn save_prompt(&self, request: &TranslationRequest) -> Result<(), PersistenceError> {
        if request.source_text.is_empty() {
            return Err(PersistenceError::IncompleteRecord(
                "empty source text".to_string(),
            ));
        }

        if !request.is_complete() {
            return Err(PersistenceError::IncompleteRecord(format!(
                "translation pending for '{}'",
                request.source_text
            )));
        }

        let request = request.clone();

        self.db
            .execute_mut_async(move |conn| {
                let tx = conn
                    .transaction()
                    .map_err(|e| PersistenceError::Insert(e.to_string()))?;

                tx.execute(
                    r#"
                    INSERT INTO prompts (text_in, text_out, version, utilisateur, created_at)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    "#,
                    params![
                        request.source_text,
                        request.translated_text,
                        request.direction.tag(),
                        request.owner,
                        chrono::Utc::now().to_rfc3339(),
                    ],
                )
                .map_err(|e| PersistenceError::Insert(e.to_string()))?;

                // An error before this point drops the transaction, which
                // rolls back the insert.
                tx.commit()
                    .map_err(|e| PersistenceError::Insert(e.to_string()))?;

                debug!(
                    "Saved {} translation for user {}",
                    request.direction, request.owner
                );
                Ok(())
            })
            .await
    }

    /// List all translation records for a user, in insertion order
    ///
    /// A lookup fault surfaces as `PersistenceError::Select`, never as an
    /// empty list: callers can always distinguish "no records" from
    /// "lookup failed".
    pub async fn list_for_user(
        &self,
        owner: i64,
    ) -> Result<Vec<TranslationRequest>, PersistenceError> {
        self.db
            .execute_async(move |conn| {
                let mut stmt = conn
                    .prepare(
                        r#"
                        SELECT text_in, text_out, version, utilisateur
                        FROM prompts
                        WHERE utilisateur = ?1
                        ORDER BY id
                        "#,
                    )
                    .map_err(|e| PersistenceError::Select(e.to_string()))?;

                let rows = stmt
                    .query_map([owner], |row| {
                        Ok((
                            row.get::<_, String>(0)?,
                            row.get::<_, String>(1)?,
                            row.get::<_, String>(2)?,
                            row.get::<_, i64>(3)?,
                        ))
                    })
                    .map_err(|e| PersistenceError::Select(e.to_string()))?;

                let mut prompts = Vec::new();
                for row in rows {
                    let (text_in, text_out, version, utilisateur) =
                        row.map_err(|e| PersistenceError::Select(e.to_string()))?;

                    let direction = version.parse().map_err(|_| {
                        PersistenceError::Select(format!(
                            "stored record carries unknown direction tag '{}'",
                            version
                        ))
                    })?;

                    prompts.push(TranslationRequest {
                        source_text: text_in,
                        translated_text: Some(text_out),
                        direction,
                        owner: utilisateur,
                    });
                }

                debug!("Loaded {} records for user {}", prompts.len(), owner);
                Ok(prompts)
            })
            .await
    }

    /// Count stored records for a user
    pub async fn count_for_user(&self, owner: i64) -> Result<i64, PersistenceError> {
        self.db
            .execute_async(move |conn| {
                conn.query_row(
                    "SELECT COUNT(*) FROM prompts WHERE utilisateur = ?1",
                    [owner],
                    |row| row.get(0),
                )
                .map_err(|e| PersistenceError::Select(e.to_string()))
            })
            .await
    }
}
