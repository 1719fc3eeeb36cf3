//! Session state
//!
//! A `Session` is the authenticated user context. It can only be obtained
//! through a successful login, so every ledger and aggregation call that
//! takes a `&Session` is gated behind credential verification.
//!
//! `SessionState` holds at most one current session. It is an ordinary
//! value: several can exist side by side, each with its own user.

use tracing::info;

use crate::error::{FinanceError, FinanceResult};
use crate::models::UserId;

use super::CredentialService;

/// An authenticated user context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: UserId,
    username: String,
}

impl Session {
    pub(crate) fn new(user_id: UserId, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }

    /// The logged-in user's ID
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// The logged-in user's name
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Holder for the current session, if any
#[derive(Debug, Default)]
pub struct SessionState {
    current: Option<Session>,
}

impl SessionState {
    /// Create an unauthenticated session state
    pub fn new() -> Self {
        Self::default()
    }

    /// Log in. On failure the state is left unauthenticated.
    pub fn login(
        &mut self,
        credentials: &CredentialService<'_>,
        username: &str,
        password: &str,
    ) -> FinanceResult<&Session> {
        self.current = None;

        let user_id = credentials
            .authenticate(username, password)?
            .ok_or(FinanceError::InvalidCredentials)?;

        info!(user_id = %user_id, username, "logged in");
        Ok(&*self.current.insert(Session::new(user_id, username)))
    }

    /// Log out. Does nothing if no one is logged in.
    pub fn logout(&mut self) {
        if let Some(session) = self.current.take() {
            info!(user_id = %session.user_id, "logged out");
        }
    }

    /// The current user's ID, if someone is logged in
    pub fn current_user(&self) -> Option<UserId> {
        self.current.as_ref().map(Session::user_id)
    }

    /// The current session, if any
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// The current session, or `NotAuthenticated`
    pub fn require(&self) -> FinanceResult<&Session> {
        self.current.as_ref().ok_or(FinanceError::NotAuthenticated)
    }

    /// Check if someone is logged in
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}
