//! User model

use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// A registered user
///
/// The password hash is kept out of serialized output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

impl User {
    /// Validate a username at registration time
    pub fn validate_username(username: &str) -> Result<(), String> {
        if username.is_empty() {
            return Err("Username is required".into());
        }
        if username.trim() != username {
            return Err("Username cannot start or end with whitespace".into());
        }
        if username.len() > 64 {
            return Err(format!(
                "Username too long ({} characters, max 64)",
                username.len()
            ));
        }
        Ok(())
    }
}
