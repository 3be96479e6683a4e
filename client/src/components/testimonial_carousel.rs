//! Auto-advancing testimonial carousel for the public home page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Autoplay runs on a timer loop that stops when the component unmounts.
//! Any manual navigation pauses it.

#[cfg(test)]
#[path = "testimonial_carousel_test.rs"]
mod testimonial_carousel_test;

use leptos::prelude::*;
use resources::carousel::CarouselState;
use resources::entity::Testimonial;
use resources::rich_text::plain_excerpt;

const MESSAGE_CHARS: usize = 280;

/// Five-star rating line, clamped to `0..=5`.
pub fn stars(rating: Option<i64>) -> String {
    let filled = usize::try_from(rating.unwrap_or(0).clamp(0, 5)).unwrap_or(0);
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[component]
pub fn TestimonialCarousel(items: Vec<Testimonial>) -> impl IntoView {
    let state = RwSignal::new(CarouselState::new(items.len()));
    let items = StoredValue::new(items);

    #[cfg(feature = "hydrate")]
    {
        let alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let alive_task = alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(
                    resources::carousel::AUTOPLAY_INTERVAL_MS,
                )))
                .await;
                if !alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                    break;
                }
                let _ = state.try_update(CarouselState::tick);
            }
        });
        on_cleanup(move || alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }

    let slide = move || {
        let index = state.with(CarouselState::index);
        items.with_value(|items| {
            items.get(index).map(|item| {
                view! {
                    <blockquote class="carousel__slide">
                        <p class="carousel__message">{plain_excerpt(&item.message, MESSAGE_CHARS)}</p>
                        <footer class="carousel__footer">
                            <span class="carousel__name">{item.name.clone()}</span>
                            <span class="carousel__rating" title="Rating">{stars(item.rating)}</span>
                            {item.source.clone().map(|source| view! { <span class="carousel__source">{source}</span> })}
                        </footer>
                    </blockquote>
                }
            })
        })
    };
    let len = state.with_untracked(CarouselState::len);

    view! {
        <section class="carousel" aria-roledescription="carousel">
            <Show
                when=move || { !state.with(CarouselState::is_empty) }
                fallback=|| view! { <p class="carousel__empty">"No testimonials yet."</p> }
            >
                {slide}
                <div class="carousel__controls">
                    <button
                        class="btn carousel__prev"
                        title="Previous"
                        on:click=move |_| state.update(|c| c.interact(CarouselState::prev))
                    >
                        "‹"
                    </button>
                    {(0..len)
                        .map(|index| {
                            view! {
                                <button
                                    class="carousel__dot"
                                    class:carousel__dot--active=move || state.with(CarouselState::index) == index
                                    title=format!("Show testimonial {}", index + 1)
                                    on:click=move |_| state.update(|c| c.interact(|c| c.go_to(index)))
                                ></button>
                            }
                        })
                        .collect_view()}
                    <button
                        class="btn carousel__next"
                        title="Next"
                        on:click=move |_| state.update(|c| c.interact(CarouselState::next))
                    >
                        "›"
                    </button>
                    <Show when=move || state.with(CarouselState::is_paused)>
                        <button class="btn carousel__resume" on:click=move |_| state.update(CarouselState::resume)>
                            "Resume"
                        </button>
                    </Show>
                </div>
            </Show>
        </section>
    }
}
