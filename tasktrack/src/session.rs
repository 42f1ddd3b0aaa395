//! Session state: who is logged in.
//!
//! Two states, [`Session::LoggedOut`] and [`Session::LoggedIn`]. The
//! transitions themselves are pure methods on [`Session`]; [`SessionState`]
//! applies them and mirrors the result into the store under
//! [`SESSION_KEY`](crate::storage::SESSION_KEY).
//!
//! Logging out never touches the user's task list.

use crate::storage::{KeyValueStore, StoreAdapter};

/// Errors from session transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The username is empty after trimming.
    #[error("Please enter a name")]
    EmptyUsername,
}

/// The current session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    /// Nobody is logged in.
    #[default]
    LoggedOut,
    /// `0` is logged in.
    LoggedIn(String),
}

impl Session {
    /// The session after logging in as `name`.
    ///
    /// The name is trimmed; no other check is made.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyUsername`] if `name` is blank.
    pub fn login(name: &str) -> Result<Self, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyUsername);
        }
        Ok(Self::LoggedIn(name.to_string()))
    }

    /// The logged-in username, if any.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::LoggedOut => None,
            Self::LoggedIn(name) => Some(name),
        }
    }

    /// Whether someone is logged in.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn(_))
    }
}

/// The session plus its persisted copy.
pub struct SessionState<S> {
    adapter: StoreAdapter<S>,
    current: Session,
    warning: Option<String>,
}

impl<S: KeyValueStore> SessionState<S> {
    /// Restores the session persisted by a previous run.
    #[must_use]
    pub fn restore(adapter: StoreAdapter<S>) -> Self {
        let current = adapter
            .load_session()
            .and_then(|name| Session::login(&name).ok())
            .unwrap_or_default();
        tracing::info!(user = ?current.username(), "session restored");
        Self {
            adapter,
            current,
            warning: None,
        }
    }

    /// The current session.
    #[must_use]
    pub const fn current(&self) -> &Session {
        &self.current
    }

    /// Logs in as `name` and persists it.
    ///
    /// If the store cannot be written the login still takes effect for this
    /// run; a warning is recorded for [`take_warning`](Self::take_warning).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyUsername`] for a blank name; the session
    /// is then unchanged.
    pub fn login(&mut self, name: &str) -> Result<&str, SessionError> {
        let next = Session::login(name)?;
        let username = next.username().unwrap_or_default();
        if let Err(e) = self.adapter.save_session(username) {
            tracing::warn!(user = %username, error = %e, "could not persist session");
            self.warning = Some("Logged in, but the session could not be saved".to_string());
        }
        tracing::info!(user = %username, "logged in");
        self.current = next;
        Ok(self.current.username().unwrap_or_default())
    }

    /// Logs out and removes the persisted session. Task data is kept.
    pub fn logout(&mut self) {
        if let Err(e) = self.adapter.clear_session() {
            tracing::warn!(error = %e, "could not clear persisted session");
            self.warning = Some("Logged out, but the saved session could not be cleared".to_string());
        }
        tracing::info!(user = ?self.current.username(), "logged out");
        self.current = Session::LoggedOut;
    }

    /// Returns and clears the last persistence warning.
    pub fn take_warning(&mut self) -> Option<String> {
        self.warning.take()
    }
}
