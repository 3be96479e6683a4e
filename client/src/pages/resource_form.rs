//! Create and edit form for any resource kind.
//!
//! SYSTEM CONTEXT
//! ==============
//! `/dashboard/:resource/new` starts from a blank form; `/:id/edit` loads the
//! record first and prefills it. Submission runs the shared mutation flow:
//! validate, one POST/PUT, then attach picked files. On success the user is
//! sent back to the list, which refetches on mount.
//!
//! DESIGN
//! ======
//! Inputs are rendered from a memoized field layout so typing only touches
//! the field values, never the input elements themselves.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::hooks::{use_navigate, use_params_map};
use resources::entity::{own_assets, Asset};
use resources::format::asset_url;
use resources::mutation::{self, FormErrors, SubmitGuard};
use resources::{AnyForm, Operation, ResourceKind, Toast};

use crate::components::dashboard_shell::DashboardShell;
use crate::components::toast::notify;
use crate::net::api::api_base_url;
use crate::pages::resource::use_resource_kind;
use crate::state::auth::{api_client, handle_api_error, AuthState};
use crate::state::toast::ToastState;
use crate::util::auth::{install_admin_redirect, install_pending_redirect};
use crate::util::form_fields::{self, Field, FieldInput};
use crate::util::task::spawn;

#[component]
pub fn ResourceFormPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_admin_redirect(auth, use_navigate());
    let kind = use_resource_kind();
    let params = use_params_map();
    let id = Memo::new(move |_| params.read().get("id").and_then(|raw| raw.parse::<i64>().ok()));

    view! {
        <DashboardShell>
            {move || match kind.get() {
                Some(kind) => view! { <ResourceForm kind=kind id=id.get()/> }.into_any(),
                None => view! { <p class="resource-page__missing">"Unknown resource."</p> }.into_any(),
            }}
        </DashboardShell>
    }
}

fn blank_fields(kind: ResourceKind) -> Vec<Field> {
    form_fields::fields(&AnyForm::blank(kind)).unwrap_or_default()
}

#[component]
fn ResourceForm(kind: ResourceKind, id: Option<i64>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let pending = RwSignal::new(None::<&'static str>);
    install_pending_redirect(pending, use_navigate());

    let op = id.map_or(Operation::Create, Operation::Update);
    let fields = RwSignal::new(blank_fields(kind));
    let assets = RwSignal::new(Vec::<Asset>::new());
    let loading = RwSignal::new(id.is_some());
    let errors = RwSignal::new(FormErrors::new());
    let guard = RwSignal::new(SubmitGuard::default());
    let file_input = NodeRef::<leptos::html::Input>::new();

    let layout = Memo::new(move |_| {
        fields.with(|fields| {
            fields
                .iter()
                .map(|field| (field.key.clone(), field.label.clone(), field.input))
                .collect::<Vec<_>>()
        })
    });

    if let Some(id) = id {
        let client = api_client(auth);
        spawn(async move {
            match client.get_kind(kind, id).await {
                Ok(detail) => {
                    match AnyForm::from_entity(kind, &detail).map(|form| form_fields::fields(&form)) {
                        Ok(Ok(loaded)) => fields.set(loaded),
                        Ok(Err(err)) | Err(err) => notify(
                            toasts,
                            Toast::error(format!("Could not read this {}: {err}", kind.singular().to_lowercase())),
                        ),
                    }
                    assets.set(own_assets(&detail));
                }
                Err(err) => {
                    notify(toasts, Toast::error(err.user_message()));
                    if let Some(route) = handle_api_error(auth, &err) {
                        pending.set(Some(route));
                    }
                }
            }
            loading.set(false);
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = match fields.with_untracked(|fields| form_fields::to_form(kind, fields)) {
            Ok(form) => form,
            Err(err) => {
                errors.set(FormErrors::from([(err.key, err.message)]));
                return;
            }
        };
        if !guard.try_update(SubmitGuard::try_begin).unwrap_or(false) {
            return;
        }
        let client = api_client(auth);
        #[cfg(feature = "hydrate")]
        let input = file_input.get_untracked();
        spawn(async move {
            #[cfg(feature = "hydrate")]
            let uploads = match input {
                Some(input) => crate::util::files::read_input(&input).await,
                None => Vec::new(),
            };
            #[cfg(not(feature = "hydrate"))]
            let uploads = Vec::new();

            match mutation::submit(&client, op, &form, uploads).await {
                Ok(success) => {
                    errors.set(FormErrors::new());
                    notify(toasts, success.toast);
                    pending.set(Some(success.navigate_to));
                }
                Err(failure) => {
                    errors.set(failure.field_errors);
                    notify(toasts, failure.toast);
                    if let Some(route) = failure.error.as_ref().and_then(|err| handle_api_error(auth, err)) {
                        pending.set(Some(route));
                    }
                }
            }
            guard.update(SubmitGuard::finish);
        });
    };

    let on_delete_asset = move |file_url: String| {
        let client = api_client(auth);
        spawn(async move {
            match client.delete_asset(&file_url).await {
                Ok(()) => {
                    assets.update(|assets| assets.retain(|asset| asset.file_url != file_url));
                    notify(toasts, Toast::success("File removed."));
                }
                Err(err) => {
                    notify(toasts, Toast::error(err.user_message()));
                    if let Some(route) = handle_api_error(auth, &err) {
                        pending.set(Some(route));
                    }
                }
            }
        });
    };

    // Server messages for keys without an input, such as `cabins.0.name`.
    let stray_errors = move || {
        let keys = layout.get();
        errors.with(|errors| {
            errors
                .iter()
                .filter(|(key, _)| !keys.iter().any(|(field, _, _)| field == *key))
                .map(|(key, message)| format!("{}: {message}", form_fields::label(key)))
                .collect::<Vec<_>>()
        })
    };

    let title = match op {
        Operation::Create => format!("New {}", kind.singular()),
        Operation::Update(id) => format!("Edit {} #{id}", kind.singular()),
    };

    view! {
        <div class="resource-form">
            <header class="resource-form__header">
                <h1>{title}</h1>
                <a class="btn" href=kind.route()>"Back to "{kind.label()}</a>
            </header>
            <Show when=move || !loading.get() fallback=|| view! { <p>"Loading..."</p> }>
                <form class="resource-form__form" on:submit=on_submit>
                    <ul class="resource-form__errors">
                        {move || stray_errors().into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                    </ul>
                    {move || {
                        layout
                            .get()
                            .into_iter()
                            .map(|(key, label, input)| field_view(key, label, input, fields, errors))
                            .collect_view()
                    }}
                    <Show when=move || assets.with(|assets| !assets.is_empty())>
                        <div class="resource-form__assets">
                            <span class="form-field__label">"Attached files"</span>
                            {move || {
                                assets
                                    .get()
                                    .into_iter()
                                    .map(|asset| {
                                        let url = asset_url(api_base_url(), &asset.file_url);
                                        let file_url = asset.file_url.clone();
                                        view! {
                                            <div class="resource-form__asset">
                                                <a href=url target="_blank" rel="noopener noreferrer">
                                                    {asset.title.clone().unwrap_or_else(|| asset.file_url.clone())}
                                                </a>
                                                <button
                                                    class="btn btn--danger"
                                                    type="button"
                                                    on:click=move |_| on_delete_asset(file_url.clone())
                                                >
                                                    "Remove"
                                                </button>
                                            </div>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </div>
                    </Show>
                    <label class="form-field">
                        <span class="form-field__label">"Upload files"</span>
                        <input class="form-field__input" type="file" multiple=true node_ref=file_input/>
                    </label>
                    <button
                        class="btn btn--primary"
                        type="submit"
                        disabled=move || guard.with(SubmitGuard::is_submitting)
                    >
                        {move || if guard.with(SubmitGuard::is_submitting) { "Saving..." } else { "Save" }}
                    </button>
                </form>
            </Show>
        </div>
    }
}

fn field_view(
    key: String,
    label: String,
    input: FieldInput,
    fields: RwSignal<Vec<Field>>,
    errors: RwSignal<FormErrors>,
) -> AnyView {
    let value = {
        let key = key.clone();
        move || fields.with(|fields| form_fields::value_of(fields, &key))
    };
    let set = {
        let key = key.clone();
        move |text: String| fields.update(|fields| form_fields::set_value(fields, &key, text))
    };
    let error = {
        let key = key.clone();
        move || errors.with(|errors| errors.get(&key).cloned())
    };

    let control = match input {
        FieldInput::LongText | FieldInput::Json => {
            let rows = if input == FieldInput::Json { "8" } else { "5" };
            view! {
                <textarea
                    class="form-field__input"
                    name=key
                    rows=rows
                    prop:value=value
                    on:input=move |ev| set(event_target_value(&ev))
                ></textarea>
            }
            .into_any()
        }
        FieldInput::Flag => view! {
            <input
                class="form-field__check"
                type="checkbox"
                name=key
                prop:checked=move || value() == "true"
                on:change=move |ev| set(event_target_checked(&ev).to_string())
            />
        }
        .into_any(),
        FieldInput::Text | FieldInput::Password | FieldInput::Date | FieldInput::Number => view! {
            <input
                class="form-field__input"
                type=form_fields::input_type(input)
                name=key
                prop:value=value
                on:input=move |ev| set(event_target_value(&ev))
            />
        }
        .into_any(),
    };

    view! {
        <label class="form-field">
            <span class="form-field__label">{label}</span>
            {control}
            {move || error().map(|message| view! { <span class="form-field__error">{message}</span> })}
        </label>
    }
    .into_any()
}
