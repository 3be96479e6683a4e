//! Public landing page with the testimonial carousel.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use resources::entity::Testimonial;
use resources::ListState;

use crate::components::testimonial_carousel::TestimonialCarousel;
use crate::net::api;
use crate::state::auth::AuthState;
use crate::util::auth::home_route;
use crate::util::task::spawn;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let testimonials = RwSignal::new(ListState::<Testimonial>::Idle);

    // Testimonials are public; no token needed.
    testimonials.update(ListState::begin);
    spawn(async move {
        let result = api::client(None).list::<Testimonial>().await;
        testimonials.update(|state| state.finish(result));
    });

    let account_link = move || {
        auth.with(|state| {
            if state.is_authenticated() {
                view! { <a class="btn btn--primary" href=home_route(state.is_admin())>"Go to my account"</a> }
                    .into_any()
            } else {
                view! {
                    <a class="btn btn--primary" href="/auth/login">"Sign in"</a>
                    <a class="btn" href="/auth/register">"Create an account"</a>
                }
                    .into_any()
            }
        })
    };

    view! {
        <div class="home-page">
            <section class="home-page__hero">
                <h1>"Tourdesk"</h1>
                <p class="home-page__tagline">"Liveaboard trips, boats and hotels across the archipelago."</p>
                <div class="home-page__actions">{account_link}</div>
            </section>
            <section class="home-page__testimonials">
                <h2>"What our guests say"</h2>
                {move || {
                    testimonials.with(|state| match state {
                        ListState::Ready(items) => view! { <TestimonialCarousel items=items.clone()/> }.into_any(),
                        ListState::Failed(err) => view! { <p class="home-page__error">{err.message.clone()}</p> }.into_any(),
                        ListState::Idle | ListState::Loading => view! { <p>"Loading..."</p> }.into_any(),
                    })
                }}
            </section>
        </div>
    }
}
