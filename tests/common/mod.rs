/*!
 * Common test utilities shared across the test suite.
 */

use std::sync::Arc;

use traducteur::backends::mock::MockFactory;
use traducteur::database::{DatabaseConnection, Repository};
use traducteur::errors::ConnectionError;
use traducteur::translation_service::TranslationService;

/// Create an in-memory repository seeded with one user at a fixed id
///
/// Returns the repository and the backing connection so tests can issue
/// raw queries when asserting on stored rows.
pub fn repository_with_user(id: i64, login: &str, password: &str) -> (Repository, DatabaseConnection) {
    let db = DatabaseConnection::new_in_memory().expect("Failed to create in-memory DB");

    let login = login.to_string();
    let password = password.to_string();
    db.execute(move |conn| {
        conn.execute(
            "INSERT INTO utilisateurs (id, login, mdp) VALUES (?1, ?2, ?3)",
            rusqlite::params![id, login, password],
        )
        .map_err(|e| ConnectionError::Unreachable(e.to_string()))?;
        Ok::<_, ConnectionError>(())
    })
    .expect("Failed to seed user");

    (Repository::new(db.clone()), db)
}

/// Create a translation service over a mock factory and seeded repository
pub fn mock_service(
    factory: MockFactory,
    repository: Repository,
) -> (TranslationService, Arc<MockFactory>) {
    let factory = Arc::new(factory);
    let service = TranslationService::new(factory.clone(), repository);
    (service, factory)
}
