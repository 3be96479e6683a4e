//! Admin chrome: resource navigation, signed-in user and logout.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use resources::{ResourceKind, LOGIN_ROUTE};

use crate::state::auth::AuthState;

#[component]
pub fn DashboardShell(children: Children) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let user_name = move || auth.with(|state| state.user().map(|user| user.name.clone()).unwrap_or_default());
    let on_logout = move |_| {
        auth.update(AuthState::logout);
        navigate(LOGIN_ROUTE, NavigateOptions::default());
    };

    view! {
        <div class="dashboard-shell">
            <header class="dashboard-shell__header toolbar">
                <a class="toolbar__brand" href="/dashboard">"Tourdesk"</a>
                <span class="toolbar__divider" aria-hidden="true"></span>
                <nav class="dashboard-shell__nav">
                    {ResourceKind::ALL
                        .iter()
                        .map(|kind| view! { <a class="dashboard-shell__link" href=kind.route()>{kind.label()}</a> })
                        .collect_view()}
                </nav>
                <span class="toolbar__spacer"></span>
                <span class="toolbar__self">{user_name}</span>
                <button class="btn toolbar__logout" on:click=on_logout title="Logout">
                    "Logout"
                </button>
            </header>
            <main class="dashboard-shell__main">{children()}</main>
        </div>
    }
}
