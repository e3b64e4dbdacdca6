//! Auth-session state for the current browser admin.
//!
//! SYSTEM CONTEXT
//! ==============
//! The `session` provider owns the session; this module mirrors its
//! snapshots into a reactive signal so the route guard, the login form and
//! admin pages re-render when the session changes.
//!
//! HYDRATION
//! =========
//! The server never sees `localStorage`, so it renders every guarded route as
//! "not yet restored". `restored` flips to true in the browser once the
//! provider's start-up read has been published, and only then does the guard
//! render or redirect.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use session::{AuthProvider, AuthSnapshot, Session};

use crate::net::api::HttpBackend;
use crate::util::storage::BrowserStorage;

/// The provider type used by the browser app.
pub type BrowserAuth = AuthProvider<BrowserStorage, HttpBackend>;

/// Reactive mirror of the provider state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
    pub loading: bool,
    /// True once the persisted session has been read in the browser.
    pub restored: bool,
}

impl AuthState {
    /// Copy a provider snapshot in, leaving `restored` untouched.
    pub fn apply(&mut self, snapshot: &AuthSnapshot) {
        self.session.clone_from(&snapshot.session);
        self.loading = snapshot.loading;
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot { session: self.session.clone(), loading: self.loading }
    }

    /// Label for the signed-in admin.
    #[must_use]
    pub fn admin_name(&self) -> Option<String> {
        self.session.as_ref().map(|s| s.admin.display_name().to_owned())
    }
}

/// Construct the provider, wire it to a signal and put both in context.
///
/// Must be called once from the root component.
pub fn provide_auth() -> (BrowserAuth, RwSignal<AuthState>) {
    let provider = BrowserAuth::start(BrowserStorage, HttpBackend::from_build_env());
    let auth = RwSignal::new(AuthState::default());

    provider.subscribe(move |snapshot| auth.update(|state| state.apply(snapshot)));

    // Effects only run in the browser, after hydration.
    let restore = provider.clone();
    Effect::new(move || {
        let snapshot = restore.snapshot();
        auth.update(|state| {
            state.apply(&snapshot);
            state.restored = true;
        });
    });

    provide_context(provider.clone());
    provide_context(auth);
    (provider, auth)
}
