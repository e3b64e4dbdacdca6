//! Public site pages and the path-resolved route host.
//!
//! SYSTEM CONTEXT
//! ==============
//! Public content is owned by the marketing site; these pages only carry the
//! route title and navigation so the admin app can be served standalone.
//! Single-segment paths not claimed by a static route are resolved through
//! `SiteRoute`, which decides whether the guard applies.

use leptos::prelude::*;
use leptos_router::hooks::use_location;
use session::{AdminSection, SiteRoute};

use crate::pages::change_password::ChangePasswordPage;
use crate::pages::section::AdminSectionPage;
use crate::util::auth::RequireAuth;

#[component]
pub fn PublicPage(route: SiteRoute) -> impl IntoView {
    view! {
        <div class="public-page">
            <nav class="public-page__nav">
                {SiteRoute::PUBLIC
                    .into_iter()
                    .filter(|r| !matches!(r, SiteRoute::PaymentSuccess | SiteRoute::PaymentCancel))
                    .map(|r| view! { <a href=r.path()>{r.title()}</a> })
                    .collect_view()}
            </nav>
            <h1>{route.title()}</h1>
        </div>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    view! { <PublicPage route=SiteRoute::Home/> }
}

/// Render whatever `SiteRoute` the current path names.
#[component]
pub fn SitePage() -> impl IntoView {
    let location = use_location();
    move || match SiteRoute::from_path(&location.pathname.get()) {
        Some(SiteRoute::Admin(AdminSection::ChangePassword)) => view! {
            <RequireAuth>
                <ChangePasswordPage/>
            </RequireAuth>
        }
        .into_any(),
        Some(SiteRoute::Admin(section)) => view! {
            <RequireAuth>
                <AdminSectionPage section=section/>
            </RequireAuth>
        }
        .into_any(),
        Some(route) if !route.is_protected() => view! { <PublicPage route=route/> }.into_any(),
        _ => view! { <p class="not-found">"Page not found."</p> }.into_any(),
    }
}
