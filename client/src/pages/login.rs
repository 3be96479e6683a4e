//! Email + password login.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use resources::mutation::{FormErrors, LoginForm, MutationFailure, SubmitGuard};
use resources::Toast;

use crate::components::toast::notify;
use crate::state::auth::{api_client, AuthState};
use crate::state::toast::ToastState;
use crate::util::auth::{home_route, install_pending_redirect};
use crate::util::task::spawn;

/// Labelled input with its validation message, shared by the auth forms.
pub(crate) fn auth_field(
    key: &'static str,
    label: &'static str,
    input_type: &'static str,
    value: RwSignal<String>,
    errors: RwSignal<FormErrors>,
) -> impl IntoView {
    view! {
        <label class="login-field">
            <span class="login-field__label">{label}</span>
            <input
                class="login-input"
                type=input_type
                name=key
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            {move || errors.with(|e| e.get(key).cloned()).map(|message| view! {
                <span class="login-field__error">{message}</span>
            })}
        </label>
    }
}

/// Send a signed-in user to their home route.
pub(crate) fn install_signed_in_redirect(auth: RwSignal<AuthState>, pending: RwSignal<Option<&'static str>>) {
    Effect::new(move || {
        let home = auth.with(|state| state.is_authenticated().then(|| home_route(state.is_admin())));
        if home.is_some() {
            pending.set(home);
        }
    });
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let pending = RwSignal::new(None::<&'static str>);
    install_pending_redirect(pending, use_navigate());
    install_signed_in_redirect(auth, pending);

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FormErrors::new());
    let guard = RwSignal::new(SubmitGuard::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = LoginForm {
            email: email.get_untracked().trim().to_owned(),
            password: password.get_untracked(),
        };
        let found = form.validate();
        if !found.is_empty() {
            errors.set(found);
            return;
        }
        if !guard.try_update(SubmitGuard::try_begin).unwrap_or(false) {
            return;
        }
        errors.set(FormErrors::new());
        let client = api_client(auth);
        spawn(async move {
            match client.login(&form.email, &form.password).await {
                Ok(session) => {
                    let name = session.user.name.clone();
                    match auth.try_update(|state| state.login(session)) {
                        Some(Err(err)) => notify(toasts, Toast::error(err.to_string())),
                        _ => notify(toasts, Toast::success(format!("Welcome back, {name}."))),
                    }
                }
                Err(err) => {
                    let failure = MutationFailure::from(err);
                    errors.set(failure.field_errors);
                    notify(toasts, failure.toast);
                }
            }
            guard.update(SubmitGuard::finish);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Tourdesk"</h1>
                <p class="login-card__subtitle">"Sign in to manage your trips"</p>
                <form class="login-form" on:submit=on_submit>
                    {auth_field("email", "Email", "email", email, errors)}
                    {auth_field("password", "Password", "password", password, errors)}
                    <button
                        class="login-button"
                        type="submit"
                        disabled=move || guard.with(SubmitGuard::is_submitting)
                    >
                        {move || if guard.with(SubmitGuard::is_submitting) { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <div class="login-divider"></div>
                <p class="login-card__subtitle">
                    "No account yet? "
                    <a href="/auth/register">"Register"</a>
                </p>
            </div>
        </div>
    }
}
