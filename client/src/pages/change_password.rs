//! Change-password page for the signed-in admin.

#[cfg(test)]
#[path = "change_password_test.rs"]
mod change_password_test;

use leptos::prelude::*;
use session::PasswordChangeOutcome;

use crate::state::auth::BrowserAuth;

/// Shown when the new password and its confirmation differ.
pub const MISMATCH_MESSAGE: &str = "New passwords do not match";

/// Local checks before anything is sent.
///
/// # Errors
///
/// Returns the message to show when a field is empty or the confirmation
/// does not match.
pub fn validate_change(current: &str, new: &str, confirm: &str) -> Result<(), &'static str> {
    if current.is_empty() || new.is_empty() || confirm.is_empty() {
        return Err(session::login_form::MISSING_FIELDS_MESSAGE);
    }
    if new != confirm {
        return Err(MISMATCH_MESSAGE);
    }
    Ok(())
}

#[component]
pub fn ChangePasswordPage() -> impl IntoView {
    let provider = expect_context::<BrowserAuth>();
    let current = RwSignal::new(String::new());
    let new = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let result = RwSignal::new(None::<PasswordChangeOutcome>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let (current_value, new_value) = (current.get_untracked(), new.get_untracked());
        if let Err(message) = validate_change(&current_value, &new_value, &confirm.get_untracked()) {
            result.set(Some(PasswordChangeOutcome::Failed { message: message.to_owned() }));
            return;
        }
        busy.set(true);
        let provider = provider.clone();
        leptos::task::spawn_local(async move {
            let outcome = provider.change_password(&current_value, &new_value).await;
            if matches!(outcome, PasswordChangeOutcome::Changed { .. }) {
                current.set(String::new());
                new.set(String::new());
                confirm.set(String::new());
            }
            result.set(Some(outcome));
            busy.set(false);
        });
    };

    let password_input = move |signal: RwSignal<String>, placeholder: &'static str| {
        view! {
            <input
                class="login-input"
                type="password"
                placeholder=placeholder
                prop:value=move || signal.get()
                on:input=move |ev| signal.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <div class="section-page">
            <header class="section-page__header toolbar">
                <a class="btn" href=session::catalog::ADMIN_LANDING_ROUTE>"Back"</a>
                <span class="toolbar__title">"Change Password"</span>
            </header>
            <form class="login-form" on:submit=on_submit>
                {password_input(current, "Current password")}
                {password_input(new, "New password")}
                {password_input(confirm, "Confirm new password")}
                <button class="login-button" type="submit" disabled=move || busy.get()>
                    "Change Password"
                </button>
            </form>
            {move || {
                result
                    .get()
                    .map(|outcome| {
                        let class = match outcome {
                            PasswordChangeOutcome::Changed { .. } => "banner banner--ok",
                            PasswordChangeOutcome::Failed { .. } => "banner banner--error",
                        };
                        view! { <p class=class>{outcome.message().to_owned()}</p> }
                    })
            }}
        </div>
    }
}
