//! Credential service
//!
//! Registers users and checks login attempts against stored Argon2 hashes.

use tracing::{info, warn};

use crate::crypto::{hash_password, verify_password, PasswordParams};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{User, UserId};
use crate::storage::Storage;

/// Service for user registration and password verification
pub struct CredentialService<'a> {
    storage: &'a Storage,
    params: PasswordParams,
}

impl<'a> CredentialService<'a> {
    /// Create a credential service with default hashing cost
    pub fn new(storage: &'a Storage) -> Self {
        Self::with_params(storage, PasswordParams::default())
    }

    /// Create a credential service with explicit hashing cost
    pub fn with_params(storage: &'a Storage, params: PasswordParams) -> Self {
        Self { storage, params }
    }

    /// Register a new user
    ///
    /// Fails with `DuplicateUsername` if the name is taken, leaving the
    /// existing user untouched.
    pub fn register(&self, username: &str, password: &str) -> FinanceResult<UserId> {
        User::validate_username(username).map_err(FinanceError::Validation)?;
        if password.is_empty() {
            return Err(FinanceError::Validation("Password is required".into()));
        }

        let hash = hash_password(password, &self.params)?;
        match self.storage.users.insert(username, &hash) {
            Ok(id) => {
                info!(user_id = %id, username, "registered user");
                Ok(id)
            }
            Err(e @ FinanceError::DuplicateUsername(_)) => {
                warn!(username, "registration rejected: username taken");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Check a username and password
    ///
    /// Returns the user's ID on a match and `None` otherwise. Unknown users
    /// and wrong passwords are indistinguishable to the caller.
    pub fn authenticate(&self, username: &str, password: &str) -> FinanceResult<Option<UserId>> {
        let Some(user) = self.storage.users.find_by_username(username)? else {
            warn!(username, "authentication failed");
            return Ok(None);
        };

        if verify_password(password, &user.password_hash)? {
            Ok(Some(user.id))
        } else {
            warn!(username, "authentication failed");
            Ok(None)
        }
    }
}
