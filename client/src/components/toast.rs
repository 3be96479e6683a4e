//! Toast stack rendered once at the app root.

use leptos::prelude::*;
use resources::{Toast, ToastLevel};

use crate::state::toast::ToastState;
#[cfg(feature = "hydrate")]
use crate::state::toast::TOAST_TIMEOUT_MS;

/// Show `toast` and dismiss it after [`TOAST_TIMEOUT_MS`].
pub fn notify(toasts: RwSignal<ToastState>, toast: Toast) {
    let id = toasts.try_update(|state| state.push(toast));
    #[cfg(feature = "hydrate")]
    {
        if let Some(id) = id {
            gloo_timers::callback::Timeout::new(TOAST_TIMEOUT_MS, move || {
                toasts.try_update(|state| state.dismiss(id));
            })
            .forget();
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
    }
}

pub fn level_class(level: ToastLevel) -> &'static str {
    match level {
        ToastLevel::Success => "toast toast--success",
        ToastLevel::Warning => "toast toast--warning",
        ToastLevel::Error => "toast toast--error",
    }
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-host" aria-live="polite">
            {move || {
                toasts
                    .get()
                    .items()
                    .iter()
                    .map(|item| {
                        let id = item.id;
                        view! {
                            <div class=level_class(item.toast.level) role="status">
                                <span class="toast__message">{item.toast.message.clone()}</span>
                                <button
                                    class="toast__close"
                                    title="Dismiss"
                                    on:click=move |_| toasts.update(|state| state.dismiss(id))
                                >
                                    "✕"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
