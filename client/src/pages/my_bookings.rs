//! Signed-in customer's own bookings.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::hooks::use_navigate;
use resources::{ListState, Record, Resource, ResourceKind, TableRow};

use crate::components::detail_panel::DetailPanel;
use crate::state::auth::{api_client, handle_api_error, AuthState};
use crate::util::auth::{install_pending_redirect, install_unauth_redirect};
use crate::util::task::spawn;

fn load(
    bookings: RwSignal<ListState<Record>>,
    auth: RwSignal<AuthState>,
    pending: RwSignal<Option<&'static str>>,
) {
    let client = api_client(auth);
    bookings.update(ListState::begin);
    spawn(async move {
        let result = client
            .my_bookings()
            .await
            .map(|items| items.iter().map(Resource::to_record).collect());
        let redirect = result.as_ref().err().and_then(|err| handle_api_error(auth, err));
        bookings.update(|state| state.finish(result));
        if redirect.is_some() {
            pending.set(redirect);
        }
    });
}

#[component]
pub fn MyBookingsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    install_unauth_redirect(auth, navigate.clone());
    let pending = RwSignal::new(None::<&'static str>);
    install_pending_redirect(pending, navigate);

    let bookings = RwSignal::new(ListState::<Record>::Idle);
    if auth.with_untracked(AuthState::is_authenticated) {
        load(bookings, auth, pending);
    }

    let columns = ResourceKind::Booking.columns();
    let user_name = move || auth.with(|state| state.user().map(|user| user.name.clone()).unwrap_or_default());
    let on_logout = move |_| auth.update(AuthState::logout);

    view! {
        <div class="bookings-page">
            <header class="toolbar">
                <a class="toolbar__brand" href="/">"Tourdesk"</a>
                <span class="toolbar__spacer"></span>
                <span class="toolbar__self">{user_name}</span>
                <button class="btn toolbar__logout" on:click=on_logout title="Logout">
                    "Logout"
                </button>
            </header>
            <h1>"My bookings"</h1>
            {move || {
                bookings.with(|state| {
                    if state.is_loading() {
                        return view! { <p>"Loading bookings..."</p> }.into_any();
                    }
                    if let Some(err) = state.error() {
                        return view! {
                            <div class="bookings-page__error">
                                <p>{err.message.clone()}</p>
                                <button class="btn" on:click=move |_| load(bookings, auth, pending)>
                                    "Try again"
                                </button>
                            </div>
                        }
                        .into_any();
                    }
                    if state.items().is_empty() {
                        return view! { <p>"You have no bookings yet."</p> }.into_any();
                    }
                    state
                        .items()
                        .iter()
                        .map(|record| {
                            let facts = columns
                                .iter()
                                .map(|column| {
                                    view! {
                                        <span class="booking-card__fact">
                                            <span class="booking-card__label">{column.label}</span>
                                            {record.cell(column.key).display()}
                                        </span>
                                    }
                                })
                                .collect_view();
                            view! {
                                <article class="booking-card">
                                    <h2>{record.title()}</h2>
                                    <div class="booking-card__facts">{facts}</div>
                                    <DetailPanel record=record.clone()/>
                                </article>
                            }
                        })
                        .collect_view()
                        .into_any()
                })
            }}
        </div>
    }
}
