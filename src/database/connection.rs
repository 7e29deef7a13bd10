/*!
 * Database connection management.
 *
 * This module handles SQLite database connection creation, initialization,
 * and provides async-safe access patterns using tokio's spawn_blocking.
 *
 * Access is strictly scoped: an operation acquires the connection lock for
 * exactly its own duration and the guard is dropped on every exit path,
 * including panics and cancellation. In-flight `rusqlite::Transaction`s
 * roll back on drop unless explicitly committed, so a closure that bails
 * out mid-transaction never leaves a partial row behind.
 */

use log::{debug, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use super::schema;
use crate::errors::ConnectionError;

/// Default database filename
const DEFAULT_DB_FILENAME: &str = "traducteur.db";

/// Default database directory name under user's data directory
const DEFAULT_DB_DIRNAME: &str = "traducteur";

/// Database connection wrapper with thread-safe access
#[derive(Clone)]
pub struct DatabaseConnection {
    /// Path to the database file
    db_path: PathBuf,
    /// Thread-safe connection wrapped in Arc<Mutex>
    connection: Arc<Mutex<Connection>>,
}

impl DatabaseConnection {
    /// Create a new database connection at the default location
    pub fn new_default() -> Result<Self, ConnectionError> {
        let db_path = Self::default_database_path()?;
        Self::new(&db_path)
    }

    /// Create a new database connection at the specified path
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self, ConnectionError> {
        let db_path = db_path.as_ref().to_path_buf();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConnectionError::Unreachable(format!(
                    "Failed to create database directory {:?}: {}",
                    parent, e
                ))
            })?;
        }

        info!("Opening database at: {:?}", db_path);

        let conn = Connection::open(&db_path).map_err(|e| {
            ConnectionError::Unreachable(format!("Failed to open database {:?}: {}", db_path, e))
        })?;

        schema::initialize_schema(&conn)
            .map_err(|e| ConnectionError::Unreachable(e.to_string()))?;

        Ok(Self {
            db_path,
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self, ConnectionError> {
        debug!("Creating in-memory database");

        let conn = Connection::open_in_memory().map_err(|e| {
            ConnectionError::Unreachable(format!("Failed to create in-memory database: {}", e))
        })?;

        schema::initialize_schema(&conn)
            .map_err(|e| ConnectionError::Unreachable(e.to_string()))?;

        Ok(Self {
            db_path: PathBuf::from(":memory:"),
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// Get the default database path
    pub fn default_database_path() -> Result<PathBuf, ConnectionError> {
        let base_dir = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
            .ok_or_else(|| {
                ConnectionError::Unreachable("Could not determine data directory".to_string())
            })?;

        Ok(base_dir.join(DEFAULT_DB_DIRNAME).join(DEFAULT_DB_FILENAME))
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Acquire the connection guard for one scoped operation
    fn lock(&self) -> Result<MutexGuard<'_, Connection>, ConnectionError> {
        self.connection
            .lock()
            .map_err(|e| ConnectionError::LockPoisoned(e.to_string()))
    }

    /// Execute a database operation within one connection scope
    ///
    /// The lock is held for exactly the duration of the closure and released
    /// on every exit path. For async contexts, use `execute_async`.
    pub fn execute<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E>,
        E: From<ConnectionError>,
    {
        let conn = self.lock()?;
        f(&conn)
    }

    /// Execute a mutable database operation within one connection scope
    ///
    /// Used for operations that open explicit transactions.
    pub fn execute_mut<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Connection) -> Result<T, E>,
        E: From<ConnectionError>,
    {
        let mut conn = self.lock()?;
        f(&mut conn)
    }

    /// Execute a database operation asynchronously using spawn_blocking
    ///
    /// This is the preferred method for async contexts as it prevents
    /// blocking the async runtime. If the surrounding future is cancelled,
    /// the blocking task still runs to completion, so open transactions
    /// are committed or rolled back rather than abandoned.
    pub async fn execute_async<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<ConnectionError> + Send + 'static,
    {
        let connection = self.connection.clone();

        tokio::task::spawn_blocking(move || {
            let conn = connection
                .lock()
                .map_err(|e| ConnectionError::LockPoisoned(e.to_string()))?;
            f(&conn)
        })
        .await
        .map_err(|e| ConnectionError::TaskPanicked(e.to_string()))?
    }

    /// Execute a mutable database operation asynchronously
    pub async fn execute_mut_async<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Connection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<ConnectionError> + Send + 'static,
    {
        let connection = self.connection.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = connection
                .lock()
                .map_err(|e| ConnectionError::LockPoisoned(e.to_string()))?;
            f(&mut conn)
        })
        .await
        .map_err(|e| ConnectionError::TaskPanicked(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConnectionError;

    #[test]
    fn test_newInMemory_shouldCreateValidConnection() {
        let db = DatabaseConnection::new_in_memory().expect("Failed to create in-memory DB");
        assert_eq!(db.path().to_string_lossy(), ":memory:");
    }

    #[test]
    fn test_execute_shouldRunOperation() {
        let db = DatabaseConnection::new_in_memory().expect("Failed to create DB");

        let result: Result<i64, ConnectionError> = db.execute(|conn| {
            let count: i64 = conn
                .query_row("SELECT 1 + 1", [], |row| row.get(0))
                .map_err(|e| ConnectionError::Unreachable(e.to_string()))?;
            Ok(count)
        });

        assert_eq!(result.unwrap(), 2);
    }

    #[test]
    fn test_new_shouldCreateFileBackedDatabase() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("traducteur-test.db");

        let db = DatabaseConnection::new(&path).expect("Failed to create file DB");
        assert_eq!(db.path(), path);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_executeAsync_shouldRunInBlockingContext() {
        let db = DatabaseConnection::new_in_memory().expect("Failed to create DB");

        let result: Result<i64, ConnectionError> = db
            .execute_async(|conn| {
                let count: i64 = conn
                    .query_row("SELECT 42", [], |row| row.get(0))
                    .map_err(|e| ConnectionError::Unreachable(e.to_string()))?;
                Ok(count)
            })
            .await;

        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_executeMutAsync_shouldRollBackDroppedTransaction() {
        let db = DatabaseConnection::new_in_memory().expect("Failed to create DB");

        // Fail after inserting inside a transaction; the drop must roll back
        let result: Result<(), ConnectionError> = db
            .execute_mut_async(|conn| {
                let tx = conn
                    .transaction()
                    .map_err(|e| ConnectionError::Unreachable(e.to_string()))?;
                tx.execute(
                    "INSERT INTO utilisateurs (login, mdp) VALUES ('ghost', 'pw')",
                    [],
                )
                .map_err(|e| ConnectionError::Unreachable(e.to_string()))?;
                Err(ConnectionError::Unreachable("forced failure".to_string()))
            })
            .await;
        assert!(result.is_err());

        let count: i64 = db
            .execute(|conn| {
                conn.query_row(
                    "SELECT COUNT(*) FROM utilisateurs WHERE login = 'ghost'",
                    [],
                    |row| row.get(0),
                )
                .map_err(|e| ConnectionError::Unreachable(e.to_string()))
            })
            .unwrap();
        assert_eq!(count, 0);
    }
}
