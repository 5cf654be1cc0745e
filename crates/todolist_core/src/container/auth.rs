//! Auth state container.
//!
//! # Responsibility
//! - Hold the current session user and mirror it to the `user` storage key.
//! - Provide the mocked login/signup/logout/check-status operations.
//!
//! # Invariants
//! - Credentials are never validated against any authority; login and
//!   signup synthesize a user record unconditionally.
//! - Only session metadata is logged, never emails or passwords.
//! - `check_status` leaves `loading = false` regardless of outcome.

use crate::clock::Clock;
use crate::container::ui::{UiContainer, View};
use crate::model::user::User;
use crate::store::{KvStore, StoreError, USER_KEY};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Auth operation error. The only failure source is the storage boundary.
#[derive(Debug)]
pub enum AuthError {
    Store(StoreError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "session storage failure: {err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Session state over an injected key-value store.
pub struct AuthContainer<'s, S: KvStore> {
    store: &'s S,
    user: Option<User>,
    loading: bool,
    error: Option<String>,
}

impl<'s, S: KvStore> AuthContainer<'s, S> {
    /// Creates a container with no session. `loading` starts true until the
    /// first `check_status` call resolves it.
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            user: None,
            loading: true,
            error: None,
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last operation failure message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Signs in with any credentials.
    ///
    /// # Contract
    /// - Never validates the password; synthesizes a fresh user record.
    /// - Persists the record under `user`, replacing any prior session.
    /// - Navigates `ui` to the dashboard on success.
    pub fn login<C: Clock>(
        &mut self,
        ui: &mut UiContainer<C>,
        email: &str,
        _password: &str,
    ) -> Result<(), AuthError> {
        self.start_session(ui, User::synthesize(email, None), "login")
    }

    /// Registers with any credentials. Identical to `login` except for the
    /// optional explicit display name.
    pub fn signup<C: Clock>(
        &mut self,
        ui: &mut UiContainer<C>,
        email: &str,
        _password: &str,
        name: Option<&str>,
    ) -> Result<(), AuthError> {
        let user = User::synthesize(email, name.map(str::to_string));
        self.start_session(ui, user, "signup")
    }

    /// Ends the session.
    ///
    /// In-memory state clears and the UI navigates to login even when the
    /// storage remove fails; the failure is still surfaced.
    pub fn logout<C: Clock>(&mut self, ui: &mut UiContainer<C>) -> Result<(), AuthError> {
        self.error = None;
        let result = self.store.remove(USER_KEY);
        let user_id = self.user.take().map(|user| user.id);
        ui.set_current_view(View::Login);

        match result {
            Ok(()) => {
                info!(
                    "event=logout module=auth status=ok user_id={}",
                    user_id.map(|id| id.to_string()).unwrap_or_else(|| "none".to_string())
                );
                Ok(())
            }
            Err(err) => {
                error!("event=logout module=auth status=error error={err}");
                let err = AuthError::Store(err);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Restores a prior session from storage. Called once at startup.
    ///
    /// # Contract
    /// - An absent `user` key resolves to no session, without error.
    /// - Read or parse failures surface as a generic error message and
    ///   leave no session in place.
    /// - `loading` is false afterward regardless of outcome.
    pub fn check_status(&mut self) -> Result<(), AuthError> {
        self.error = None;
        let result = self.restore_session();
        self.loading = false;
        if let Err(err) = &result {
            error!("event=check_status module=auth status=error error={err}");
            self.error = Some("Failed to check authentication status".to_string());
        }
        result
    }

    fn restore_session(&mut self) -> Result<(), AuthError> {
        match self.store.get(USER_KEY)? {
            Some(raw) => {
                let user: User = serde_json::from_str(&raw).map_err(StoreError::from)?;
                info!(
                    "event=check_status module=auth status=ok restored=true user_id={}",
                    user.id
                );
                self.user = Some(user);
            }
            None => {
                info!("event=check_status module=auth status=ok restored=false");
                self.user = None;
            }
        }
        Ok(())
    }

    fn start_session<C: Clock>(
        &mut self,
        ui: &mut UiContainer<C>,
        user: User,
        operation: &str,
    ) -> Result<(), AuthError> {
        self.error = None;
        let raw = match serde_json::to_string(&user) {
            Ok(raw) => raw,
            Err(err) => return self.fail_session(operation, StoreError::from(err)),
        };
        if let Err(err) = self.store.set(USER_KEY, &raw) {
            return self.fail_session(operation, err);
        }

        info!("event={operation} module=auth status=ok user_id={}", user.id);
        self.user = Some(user);
        ui.set_current_view(View::Dashboard);
        Ok(())
    }

    fn fail_session(&mut self, operation: &str, err: StoreError) -> Result<(), AuthError> {
        error!("event={operation} module=auth status=error error={err}");
        let err = AuthError::Store(err);
        self.error = Some(err.to_string());
        Err(err)
    }
}
