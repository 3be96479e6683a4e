//! Admin list page for one resource kind.
//!
//! SYSTEM CONTEXT
//! ==============
//! `/dashboard/:resource` resolves the kind from the path, fetches the list
//! and renders it through `DataTable`. Every delete is followed by exactly
//! one refetch, whatever the outcome, so the table shows what the backend
//! actually holds.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::hooks::{use_navigate, use_params_map};
use resources::listing::delete_records;
use resources::mutation::deleted_toast;
use resources::{ResourceKind, ResourceList, Toast};

use crate::components::dashboard_shell::DashboardShell;
use crate::components::data_table::DataTable;
use crate::components::toast::notify;
use crate::state::auth::{api_client, handle_api_error, AuthState};
use crate::state::toast::ToastState;
use crate::util::auth::{install_admin_redirect, install_pending_redirect};
use crate::util::task::spawn;

/// Kind named by the `:resource` path segment.
pub(crate) fn use_resource_kind() -> Memo<Option<ResourceKind>> {
    let params = use_params_map();
    Memo::new(move |_| params.read().get("resource").and_then(|raw| raw.parse().ok()))
}

#[component]
pub fn ResourcePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_admin_redirect(auth, use_navigate());
    let kind = use_resource_kind();

    view! {
        <DashboardShell>
            {move || match kind.get() {
                Some(kind) => view! { <ResourceTable kind=kind/> }.into_any(),
                None => view! { <p class="resource-page__missing">"Unknown resource."</p> }.into_any(),
            }}
        </DashboardShell>
    }
}

/// Fetch the list again, following a 401 to the login page.
fn refresh(list: RwSignal<ResourceList>, auth: RwSignal<AuthState>, pending: RwSignal<Option<&'static str>>) {
    let kind = list.with_untracked(ResourceList::kind);
    let client = api_client(auth);
    list.update(ResourceList::begin_refetch);
    spawn(async move {
        let result = client.list_kind(kind).await;
        let redirect = result.as_ref().err().and_then(|err| handle_api_error(auth, err));
        list.update(|l| l.finish_refetch(result));
        if redirect.is_some() {
            pending.set(redirect);
        }
    });
}

#[component]
fn ResourceTable(kind: ResourceKind) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let pending = RwSignal::new(None::<&'static str>);
    install_pending_redirect(pending, use_navigate());

    let list = RwSignal::new(ResourceList::new(kind));
    let confirm = RwSignal::new(None::<Vec<i64>>);
    refresh(list, auth, pending);

    let on_delete_request = Callback::new(move |ids: Vec<i64>| confirm.set(Some(ids)));
    let on_delete_cancel = Callback::new(move |()| confirm.set(None));
    let on_delete_confirm = Callback::new(move |()| {
        let Some(ids) = confirm.get_untracked() else {
            return;
        };
        confirm.set(None);
        let client = api_client(auth);
        spawn(async move {
            let outcome = delete_records(&client, kind, &ids).await;
            list.update(|l| l.table.forget(&ids));
            match outcome {
                Ok(()) => notify(toasts, deleted_toast(kind, ids.len())),
                Err(err) => {
                    notify(toasts, Toast::error(err.user_message()));
                    if let Some(route) = handle_api_error(auth, &err) {
                        pending.set(Some(route));
                    }
                }
            }
            refresh(list, auth, pending);
        });
    });

    let error = move || list.with(|l| l.state().error().map(|err| err.message.clone()));

    view! {
        <div class="resource-page">
            <header class="resource-page__header">
                <h1>{kind.label()}</h1>
                <button class="btn" on:click=move |_| refresh(list, auth, pending)>
                    "Refresh"
                </button>
            </header>
            {move || error().map(|message| view! { <p class="resource-page__error">{message}</p> })}
            <DataTable list=list on_delete=on_delete_request/>
            <Show when=move || confirm.with(Option::is_some)>
                <ConfirmDeleteDialog
                    count=Signal::derive(move || confirm.with(|ids| ids.as_ref().map_or(0, Vec::len)))
                    noun=kind.singular()
                    on_cancel=on_delete_cancel
                    on_confirm=on_delete_confirm
                />
            </Show>
        </div>
    }
}

#[component]
fn ConfirmDeleteDialog(
    #[prop(into)] count: Signal<usize>,
    noun: &'static str,
    on_cancel: Callback<()>,
    on_confirm: Callback<()>,
) -> impl IntoView {
    let message = move || match count.get() {
        1 => format!("This will permanently delete this {}.", noun.to_lowercase()),
        n => format!("This will permanently delete {n} records."),
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>{format!("Delete {noun}")}</h2>
                <p class="dialog__danger">{message}</p>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--danger" on:click=move |_| on_confirm.run(())>
                        "Delete"
                    </button>
                </div>
            </div>
        </div>
    }
}
