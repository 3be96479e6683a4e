//! Admin landing page linking every managed resource.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the admin home route. Signed-out users go to login and customers
//! go to their bookings.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use resources::ResourceKind;

use crate::components::dashboard_shell::DashboardShell;
use crate::state::auth::AuthState;
use crate::util::auth::install_admin_redirect;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_admin_redirect(auth, use_navigate());

    let greeting = move || {
        auth.with(|state| {
            state
                .user()
                .map_or_else(|| "Welcome.".to_owned(), |user| format!("Welcome, {}.", user.name))
        })
    };

    view! {
        <Show
            when=move || auth.with(AuthState::is_admin)
            fallback=|| view! { <div class="dashboard-page"><p>"Redirecting..."</p></div> }
        >
            <DashboardShell>
                <div class="dashboard-page">
                    <h1 class="dashboard-page__title">{greeting}</h1>
                    <div class="dashboard-page__cards">
                        {ResourceKind::ALL
                            .iter()
                            .map(|kind| {
                                view! {
                                    <a class="resource-card" href=kind.route()>
                                        <span class="resource-card__name">{kind.label()}</span>
                                        <span class="resource-card__path">{kind.path()}</span>
                                    </a>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
            </DashboardShell>
        </Show>
    }
}
