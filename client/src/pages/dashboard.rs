//! Admin dashboard: one tile per admin section plus logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. Logout only clears the session;
//! the surrounding route guard observes the change and moves to `/login`.

use leptos::prelude::*;
use session::AdminSection;

use crate::state::auth::{AuthState, BrowserAuth};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let provider = expect_context::<BrowserAuth>();

    let on_logout = move |_| provider.logout();
    let greeting = move || {
        auth.with(|state| state.admin_name())
            .map(|name| format!("Signed in as {name}"))
            .unwrap_or_default()
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header toolbar">
                <span class="toolbar__title">"Admin Dashboard"</span>
                <span class="toolbar__spacer"></span>
                <span class="toolbar__identity">{greeting}</span>
                <button class="btn" on:click=on_logout title="Log out">
                    "Logout"
                </button>
            </header>
            <nav class="dashboard-page__grid">
                {AdminSection::ALL
                    .into_iter()
                    .map(|section| view! { <SectionTile section=section/> })
                    .collect_view()}
            </nav>
        </div>
    }
}

#[component]
fn SectionTile(section: AdminSection) -> impl IntoView {
    view! {
        <a class="section-tile" href=section.path()>
            <span class="section-tile__label">{section.label()}</span>
        </a>
    }
}
