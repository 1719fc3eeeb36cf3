//! Password hashing using Argon2id
//!
//! Every user gets a fresh random salt. Hashes are stored as PHC strings
//! (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`), so the cost parameters
//! travel with the hash and older hashes keep verifying after the settings
//! change.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::{FinanceError, FinanceResult};

/// Cost parameters for new password hashes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordParams {
    /// Memory cost in KiB (default: 19456 = 19 MiB)
    pub memory_cost: u32,
    /// Time cost (iterations, default: 2)
    pub time_cost: u32,
    /// Parallelism degree (default: 1)
    pub parallelism: u32,
}

impl Default for PasswordParams {
    fn default() -> Self {
        Self {
            memory_cost: Params::DEFAULT_M_COST,
            time_cost: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl PasswordParams {
    /// Create params with specific values
    pub fn with_values(memory_cost: u32, time_cost: u32, parallelism: u32) -> Self {
        Self {
            memory_cost,
            time_cost,
            parallelism,
        }
    }

    fn hasher(&self) -> FinanceResult<Argon2<'static>> {
        let params = Params::new(self.memory_cost, self.time_cost, self.parallelism, None)
            .map_err(|e| FinanceError::PasswordHash(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            params,
        ))
    }
}

/// Hash a password with a fresh random salt
pub fn hash_password(plain: &str, params: &PasswordParams) -> FinanceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = params
        .hasher()?
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            FinanceError::PasswordHash(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Check a password against a stored PHC string
///
/// A wrong password is `Ok(false)`; only a malformed stored hash is an error.
pub fn verify_password(plain: &str, stored: &str) -> FinanceResult<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        FinanceError::PasswordHash(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
pub(crate) fn fast_params() -> PasswordParams {
    PasswordParams::with_values(1024, 1, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("testpassword", &fast_params()).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("testpassword", &hash).unwrap());
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hash = hash_password("testpassword", &fast_params()).unwrap();
        assert!(!verify_password("wrongpassword", &hash).unwrap());
    }

    #[test]
    fn test_same_password_different_salt() {
        let a = hash_password("same", &fast_params()).unwrap();
        let b = hash_password("same", &fast_params()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_params_travel_with_hash() {
        let hash = hash_password("pw", &PasswordParams::with_values(2048, 1, 1)).unwrap();
        assert!(hash.contains("m=2048,t=1,p=1"));
        assert!(verify_password("pw", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(matches!(err, FinanceError::PasswordHash(_)));
    }

    #[test]
    fn test_invalid_params() {
        let err = hash_password("pw", &PasswordParams::with_values(1, 0, 1)).unwrap_err();
        assert!(matches!(err, FinanceError::PasswordHash(_)));
    }

    #[test]
    fn test_default_params() {
        let params = PasswordParams::default();
        assert_eq!(params.memory_cost, 19456);
        assert_eq!(params.time_cost, 2);
        assert_eq!(params.parallelism, 1);
    }
}
