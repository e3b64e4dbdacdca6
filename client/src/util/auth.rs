//! Shared auth UI helpers: the route guard and the post-login redirect.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected route is wrapped in [`RequireAuth`] so all of them apply
//! identical unauthenticated redirect behavior.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::GuardDecision;

use crate::state::auth::AuthState;

/// Guard verdict for the current state; `None` until the browser has
/// restored the persisted session.
#[must_use]
pub fn guard_decision(state: &AuthState) -> Option<GuardDecision> {
    if !state.restored {
        return None;
    }
    Some(session::guard::check(&state.snapshot()))
}

/// Navigate whenever the guard decides to redirect.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(GuardDecision::Redirect { to }) = auth.with(guard_decision) {
            navigate(to, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

/// Render `children` only while a session token is held; otherwise redirect
/// to the login route.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let admitted = move || auth.with(|state| guard_decision(state) == Some(GuardDecision::Render));

    view! {
        <Show
            when=admitted
            fallback=|| view! { <p class="guard-pending">"Checking session..."</p> }
        >
            {children()}
        </Show>
    }
}

/// Replace the whole document with `path`.
pub fn hard_redirect(path: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(path) {
                log::warn!("hard redirect to {path} failed: {e:?}");
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = path;
    }
}
