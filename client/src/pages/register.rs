//! Customer self-registration.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use resources::mutation::{FormErrors, MutationFailure, RegisterForm, SubmitGuard};
use resources::{Toast, LOGIN_ROUTE};

use crate::components::toast::notify;
use crate::pages::login::{auth_field, install_signed_in_redirect};
use crate::state::auth::{api_client, AuthState};
use crate::state::toast::ToastState;
use crate::util::auth::install_pending_redirect;
use crate::util::task::spawn;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let pending = RwSignal::new(None::<&'static str>);
    install_pending_redirect(pending, use_navigate());
    install_signed_in_redirect(auth, pending);

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let errors = RwSignal::new(FormErrors::new());
    let guard = RwSignal::new(SubmitGuard::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = RegisterForm {
            name: name.get_untracked().trim().to_owned(),
            email: email.get_untracked().trim().to_owned(),
            password: password.get_untracked(),
            password_confirmation: confirmation.get_untracked(),
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
            match client.register(&form).await {
                // Some backends sign the new user in straight away.
                Ok(Some(session)) => match auth.try_update(|state| state.login(session)) {
                    Some(Err(err)) => notify(toasts, Toast::error(err.to_string())),
                    _ => notify(toasts, Toast::success("Account created.")),
                },
                Ok(None) => {
                    notify(toasts, Toast::success("Account created. Please sign in."));
                    pending.set(Some(LOGIN_ROUTE));
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
                <h1>"Create an account"</h1>
                <form class="login-form" on:submit=on_submit>
                    {auth_field("name", "Name", "text", name, errors)}
                    {auth_field("email", "Email", "email", email, errors)}
                    {auth_field("password", "Password", "password", password, errors)}
                    {auth_field("password_confirmation", "Confirm password", "password", confirmation, errors)}
                    <button
                        class="login-button"
                        type="submit"
                        disabled=move || guard.with(SubmitGuard::is_submitting)
                    >
                        "Register"
                    </button>
                </form>
                <div class="login-divider"></div>
                <p class="login-card__subtitle">
                    "Already registered? "
                    <a href=LOGIN_ROUTE>"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
