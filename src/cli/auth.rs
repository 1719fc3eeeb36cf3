//! Registration and login for CLI commands
//!
//! No session outlives a single invocation: authenticated commands log in,
//! run, and log out again.

use tracing::debug;

use crate::config::Settings;
use crate::crypto::SecureString;
use crate::error::{FinanceError, FinanceResult};
use crate::services::{CredentialService, Session, SessionState};
use crate::storage::Storage;

/// Environment variable read before prompting for a password
pub const PASSWORD_ENV: &str = "FINANCE_PASSWORD";

/// Read a password from `FINANCE_PASSWORD`, or prompt with hidden input
pub fn read_password(prompt: &str) -> FinanceResult<SecureString> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        debug!("using password from environment");
        return Ok(SecureString::from(password));
    }

    rpassword::prompt_password(prompt)
        .map(SecureString::from)
        .map_err(|e| FinanceError::Io(format!("Failed to read password: {}", e)))
}

/// Register a new user
pub fn handle_register(storage: &Storage, settings: &Settings, username: &str) -> FinanceResult<()> {
    let password = read_password(&format!("Password for {}: ", username))?;
    let id = CredentialService::with_params(storage, settings.password_hashing.clone())
        .register(username, &password)?;

    println!("Registered user '{}' ({})", username, id);
    Ok(())
}

/// Log in as `username`, run `f` with the session, then log out
///
/// Logout happens whether or not `f` succeeds.
pub fn with_session<T>(
    storage: &Storage,
    settings: &Settings,
    username: Option<&str>,
    f: impl FnOnce(&Session) -> FinanceResult<T>,
) -> FinanceResult<T> {
    let username = username.ok_or_else(|| {
        FinanceError::Validation("No user given; pass --user or set FINANCE_USER".into())
    })?;
    let password = read_password(&format!("Password for {}: ", username))?;
    let credentials = CredentialService::with_params(storage, settings.password_hashing.clone());

    let mut state = SessionState::new();
    let result = {
        let session = state.login(&credentials, username, &password)?;
        f(session)
    };
    state.logout();
    result
}
