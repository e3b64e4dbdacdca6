//! List-and-delete panel for one backend collection.
//!
//! DESIGN
//! ======
//! Reads are unauthenticated; deletes carry the session bearer token. Every
//! failure lands in a panel-local banner and leaves the last good list in
//! place.

use leptos::prelude::*;
use serde_json::Value;
use session::AdminResource;

use crate::net::api;
use crate::state::auth::BrowserAuth;
use crate::util::items::{item_details, item_label};

#[component]
pub fn ResourcePanel(resource: AdminResource) -> impl IntoView {
    let provider = expect_context::<BrowserAuth>();
    let items = RwSignal::new(Vec::<Value>::new());
    let banner = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);

    let backend = provider.backend().clone();
    let reload = Callback::new(move |()| {
        let backend = backend.clone();
        loading.set(true);
        leptos::task::spawn_local(async move {
            match api::fetch_items(&backend, resource).await {
                Ok(list) => {
                    items.set(list);
                    banner.set(None);
                }
                Err(message) => banner.set(Some(message)),
            }
            loading.set(false);
        });
    });

    // Effects only run in the browser.
    Effect::new(move || reload.run(()));

    let on_delete = Callback::new(move |id: String| {
        let Some(token) = provider.token() else {
            banner.set(Some(session::provider::NOT_AUTHENTICATED_MESSAGE.to_owned()));
            return;
        };
        let backend = provider.backend().clone();
        leptos::task::spawn_local(async move {
            match api::delete_item(&backend, resource, &id, &token).await {
                Ok(()) => reload.run(()),
                Err(message) => banner.set(Some(message)),
            }
        });
    });

    view! {
        <section class="resource-panel">
            <header class="resource-panel__header">
                <h2>{resource.name()}</h2>
                <button class="btn" on:click=move |_| reload.run(()) disabled=move || loading.get()>
                    "Refresh"
                </button>
            </header>
            {move || banner.get().map(|message| view! { <p class="banner banner--error">{message}</p> })}
            <Show
                when=move || items.with(|list| !list.is_empty())
                fallback=move || {
                    view! {
                        <p class="resource-panel__empty">
                            {move || if loading.get() { "Loading..." } else { "No items." }}
                        </p>
                    }
                }
            >
                <ul class="resource-panel__list">
                    <For
                        each=move || items.get()
                        key=|item| item.to_string()
                        children=move |item| view! { <ResourceRow item=item on_delete=on_delete/> }
                    />
                </ul>
            </Show>
        </section>
    }
}

#[component]
fn ResourceRow(item: Value, on_delete: Callback<String>) -> impl IntoView {
    let id = session::catalog::item_id(&item).map(str::to_owned);
    let label = item_label(&item);
    let details = item_details(&item);
    let deletable = id.is_some();

    view! {
        <li class="resource-row">
            <details>
                <summary class="resource-row__label">{label}</summary>
                <pre class="resource-row__details">{details}</pre>
            </details>
            <Show when=move || deletable>
                <button
                    class="btn btn--danger"
                    on:click={
                        let id = id.clone();
                        move |_| {
                            if let Some(id) = id.clone() {
                                on_delete.run(id);
                            }
                        }
                    }
                >
                    "Delete"
                </button>
            </Show>
        </li>
    }
}
