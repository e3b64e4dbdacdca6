//! Admin login page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Input validation and the post-login navigation policy live in
//! `session::login_form`; this page binds that model to inputs and runs the
//! submit on the browser task queue.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use session::{LoginForm, SubmitOutcome};

use crate::state::auth::{AuthState, BrowserAuth};

/// Submit button label for the current loading state.
#[must_use]
pub fn submit_label(loading: bool) -> &'static str {
    if loading { "Logging in..." } else { "Login" }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let provider = expect_context::<BrowserAuth>();
    let form = RwSignal::new(LoginForm::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if auth.get_untracked().loading {
            return;
        }
        let provider = provider.clone();
        leptos::task::spawn_local(async move {
            let mut draft = form.get_untracked();
            let outcome = draft.submit(&provider).await;
            form.set(draft);
            if let SubmitOutcome::HardRedirect(path) = outcome {
                crate::util::auth::hard_redirect(path);
            }
        });
    };

    let loading = move || auth.with(|state| state.loading);

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"STEM Inspire"</h1>
                <p class="login-card__subtitle">"Admin Login"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="admin@example.org"
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=loading>
                        {move || submit_label(loading())}
                    </button>
                </form>
                <Show when=move || form.with(|f| f.error.is_some())>
                    <p class="login-message login-message--error">
                        {move || form.with(|f| f.error.clone().unwrap_or_default())}
                    </p>
                </Show>
            </div>
        </div>
    }
}
