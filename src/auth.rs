/*!
 * Credential verification.
 *
 * Thin service over the repository's credential lookup. Denied credentials
 * are a normal outcome carried in the returned `User`; only faults of the
 * lookup itself surface as errors.
 */

use log::{info, warn};

use crate::database::models::User;
use crate::database::repository::Repository;
use crate::errors::AuthLookupError;

/// Verifies login/password pairs against stored records
#[derive(Clone)]
pub struct CredentialVerifier {
    /// Repository backing the lookup
    repository: Repository,
}

impl CredentialVerifier {
    /// Create a verifier over the given repository
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Verify a login/password pair
    ///
    /// Returns an authenticated `User` with `id` populated on a match, an
    /// unauthenticated `User` when the pair matches no record, and
    /// `AuthLookupError` only when the lookup itself faulted.
    pub async fn verify(&self, login: &str, password: &str) -> Result<User, AuthLookupError> {
        let user = self.repository.verify_login(login, password).await?;

        if user.authenticated {
            info!("User '{}' authenticated", user.login);
        } else {
            warn!("Authentication denied for login '{}'", login);
        }

        Ok(user)
    }
}
