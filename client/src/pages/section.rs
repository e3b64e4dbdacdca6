//! Admin section page: one resource panel per collection the section edits.

use leptos::prelude::*;
use session::AdminSection;

use crate::components::resource_panel::ResourcePanel;

#[component]
pub fn AdminSectionPage(section: AdminSection) -> impl IntoView {
    view! {
        <div class="section-page">
            <header class="section-page__header toolbar">
                <a class="btn" href=session::catalog::ADMIN_LANDING_ROUTE>"Back"</a>
                <span class="toolbar__title">{section.label()}</span>
            </header>
            {section
                .resources()
                .iter()
                .map(|resource| view! { <ResourcePanel resource=*resource/> })
                .collect_view()}
        </div>
    }
}
