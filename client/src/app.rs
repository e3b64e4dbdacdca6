//! Root component: auth provider start-up, the SSR shell and the route table.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{
    dashboard::DashboardPage,
    login::LoginPage,
    public::{HomePage, SitePage},
};
use crate::state::auth::provide_auth;
use crate::util::auth::RequireAuth;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Starts the auth provider once and routes every admin path through the
/// guard. Admin section paths are resolved by [`SitePage`].
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    let _ = provide_auth();

    view! {
        <Stylesheet id="leptos" href="/pkg/stem-inspire.css"/>
        <Title text="STEM Inspire"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route
                    path=StaticSegment("admin-dashboard")
                    view=|| view! {
                        <RequireAuth>
                            <DashboardPage/>
                        </RequireAuth>
                    }
                />
                <Route path=ParamSegment("page") view=SitePage/>
            </Routes>
        </Router>
    }
}
