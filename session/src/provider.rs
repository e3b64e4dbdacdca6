//! Auth Provider: the single owner of in-memory session state.
//!
//! SYSTEM CONTEXT
//! ==============
//! One provider is constructed at application start and handed to the route
//! guard, the login form and every admin page. Consumers read snapshots or
//! subscribe to changes; only the provider mutates the session and its
//! persisted copy.
//!
//! STATE MACHINE
//! =============
//! `Anonymous` / `Authenticated` follow from whether a session is held;
//! `Authenticating` is any moment where a login request is in flight.
//! Start-up restores whatever the Session Store holds without asking the
//! backend whether the token is still honored.
//!
//! CONCURRENCY
//! ===========
//! Overlapping `login` calls are not de-duplicated. Each one clears
//! `loading` when it settles and the last response to arrive decides the
//! final session. Locks are never held across the request await.

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;

use std::sync::{Arc, Mutex, PoisonError};

use crate::backend::{AuthBackend, PasswordChange};
use crate::error::BackendError;
use crate::model::{AdminIdentity, Credentials, Session};
use crate::storage::KeyValueStorage;
use crate::store::SessionStore;

/// Generic failure text for transport and decode failures.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";
/// Failure text when the backend rejects without a message.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";
/// Failure text for a password change attempted without a session.
pub const NOT_AUTHENTICATED_MESSAGE: &str = "Not authenticated";
/// Failure text for a password change that could not complete.
pub const PASSWORD_CHANGE_FAILED_MESSAGE: &str = "Failed to change password";
/// Success text when the backend confirms a password change without a message.
pub const PASSWORD_CHANGED_MESSAGE: &str = "Password changed";

/// Coarse authentication phase derived from a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthPhase {
    Anonymous,
    Authenticating,
    Authenticated,
}

/// Point-in-time view of the provider state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthSnapshot {
    pub session: Option<Session>,
    /// True while a login request is in flight.
    pub loading: bool,
}

impl AuthSnapshot {
    #[must_use]
    pub fn phase(&self) -> AuthPhase {
        if self.loading {
            AuthPhase::Authenticating
        } else if self.session.is_some() {
            AuthPhase::Authenticated
        } else {
            AuthPhase::Anonymous
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    #[must_use]
    pub fn admin(&self) -> Option<&AdminIdentity> {
        self.session.as_ref().map(|s| &s.admin)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

/// Result of [`AuthProvider::login`]. Failures are values, never panics or errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    Failure { message: String },
}

impl LoginOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Failure message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Failure { message } => Some(message),
        }
    }
}

/// Result of [`AuthProvider::change_password`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PasswordChangeOutcome {
    Changed { message: String },
    Failed { message: String },
}

impl PasswordChangeOutcome {
    /// Text to show the user either way.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Changed { message } | Self::Failed { message } => message,
        }
    }
}

type Listener = Arc<dyn Fn(&AuthSnapshot) + Send + Sync>;

struct Inner<S, B> {
    store: SessionStore<S>,
    backend: B,
    state: Mutex<AuthSnapshot>,
    listeners: Mutex<Vec<Listener>>,
}

/// Shared handle to the application's auth state.
///
/// Cloning is cheap; every clone observes and mutates the same state.
pub struct AuthProvider<S, B> {
    inner: Arc<Inner<S, B>>,
}

impl<S, B> Clone for AuthProvider<S, B> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<S: KeyValueStorage, B: AuthBackend> AuthProvider<S, B> {
    /// Construct the provider, restoring any persisted session.
    pub fn start(storage: S, backend: B) -> Self {
        let store = SessionStore::new(storage);
        let session = store.read();
        tracing::debug!(restored = session.is_some(), "auth provider started");

        Self {
            inner: Arc::new(Inner {
                store,
                backend,
                state: Mutex::new(AuthSnapshot { session, loading: false }),
                listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Current state.
    #[must_use]
    pub fn snapshot(&self) -> AuthSnapshot {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn phase(&self) -> AuthPhase {
        self.snapshot().phase()
    }

    /// Current bearer token, if authenticated.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .session
            .as_ref()
            .map(|s| s.token.clone())
    }

    /// Register a callback invoked with the new snapshot after every change.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&AuthSnapshot) + Send + Sync + 'static,
    {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(listener));
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.inner.store
    }

    pub fn backend(&self) -> &B {
        &self.inner.backend
    }

    /// Check credentials with the backend and, on success, persist and adopt
    /// the returned session.
    ///
    /// Input emptiness is the caller's concern. `loading` is raised before the
    /// request and lowered once it settles, whatever the result.
    pub async fn login(&self, email: &str, password: &str) -> LoginOutcome {
        self.update(|state| state.loading = true);

        let credentials = Credentials::new(email, password);
        let result = self.inner.backend.login(&credentials).await;

        match result {
            Ok(grant) => {
                let session = Session::from(grant);
                if let Err(e) = self.inner.store.write(&session) {
                    tracing::warn!(error = %e, "session persistence failed; session kept in memory only");
                }
                self.update(|state| {
                    state.session = Some(session);
                    state.loading = false;
                });
                tracing::debug!("admin login succeeded");
                LoginOutcome::Success
            }
            Err(BackendError::Rejected { status, message }) => {
                self.update(|state| state.loading = false);
                tracing::debug!(status, "admin login rejected");
                LoginOutcome::Failure { message: message.unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_owned()) }
            }
            Err(e) => {
                self.update(|state| state.loading = false);
                tracing::warn!(error = %e, "admin login request failed");
                LoginOutcome::Failure { message: SERVER_ERROR_MESSAGE.to_owned() }
            }
        }
    }

    /// Drop the session from memory and storage. Always succeeds.
    pub fn logout(&self) {
        if let Err(e) = self.inner.store.clear() {
            tracing::warn!(error = %e, "clearing persisted session failed");
        }
        self.update(|state| state.session = None);
        tracing::debug!("admin logged out");
    }

    /// Change the admin password using the current bearer token.
    pub async fn change_password(&self, current_password: &str, new_password: &str) -> PasswordChangeOutcome {
        let Some(token) = self.token() else {
            return PasswordChangeOutcome::Failed { message: NOT_AUTHENTICATED_MESSAGE.to_owned() };
        };

        let change = PasswordChange {
            current_password: current_password.to_owned(),
            new_password: new_password.to_owned(),
        };

        match self.inner.backend.change_password(&token, &change).await {
            Ok(message) => PasswordChangeOutcome::Changed {
                message: message.unwrap_or_else(|| PASSWORD_CHANGED_MESSAGE.to_owned()),
            },
            Err(BackendError::Rejected { status, message }) => {
                tracing::debug!(status, "password change rejected");
                PasswordChangeOutcome::Failed {
                    message: message.unwrap_or_else(|| PASSWORD_CHANGE_FAILED_MESSAGE.to_owned()),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "password change request failed");
                PasswordChangeOutcome::Failed { message: PASSWORD_CHANGE_FAILED_MESSAGE.to_owned() }
            }
        }
    }

    fn update(&self, apply: impl FnOnce(&mut AuthSnapshot)) {
        let snapshot = {
            let mut state = self.inner.state.lock().unwrap_or_else(PoisonError::into_inner);
            apply(&mut state);
            state.clone()
        };
        let listeners = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in &listeners {
            listener(&snapshot);
        }
    }
}
