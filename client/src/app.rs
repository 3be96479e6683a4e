//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::toast::ToastHost;
use crate::pages::{
    dashboard::DashboardPage, home::HomePage, login::LoginPage, my_bookings::MyBookingsPage,
    register::RegisterPage, resource::ResourcePage, resource_form::ResourceFormPage,
};
use crate::state::auth::{AuthState, BrowserStore};
use crate::state::toast::ToastState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="id">
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
/// Provides the session and toast contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::restore(BrowserStore));
    let toasts = RwSignal::new(ToastState::default());

    provide_context(auth);
    provide_context(toasts);

    view! {
        <Stylesheet id="leptos" href="/pkg/tourdesk.css"/>
        <Title text="Tourdesk"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=(StaticSegment("auth"), StaticSegment("login")) view=LoginPage/>
                <Route path=(StaticSegment("auth"), StaticSegment("register")) view=RegisterPage/>
                <Route path=StaticSegment("my-bookings") view=MyBookingsPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
                <Route path=(StaticSegment("dashboard"), ParamSegment("resource")) view=ResourcePage/>
                <Route
                    path=(StaticSegment("dashboard"), ParamSegment("resource"), StaticSegment("new"))
                    view=ResourceFormPage
                />
                <Route
                    path=(
                        StaticSegment("dashboard"),
                        ParamSegment("resource"),
                        ParamSegment("id"),
                        StaticSegment("edit"),
                    )
                    view=ResourceFormPage
                />
            </Routes>
        </Router>
        <ToastHost/>
    }
}
