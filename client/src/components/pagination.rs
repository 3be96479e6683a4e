//! Page controls and page-size picker for the resource table.

#[cfg(test)]
#[path = "pagination_test.rs"]
mod pagination_test;

use leptos::prelude::*;
use resources::table::PAGE_SIZES;

/// Numbered buttons shown around the current page.
const WINDOW: usize = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub index: usize,
    pub count: usize,
    pub total: usize,
    pub size: usize,
}

impl PageInfo {
    pub fn label(&self) -> String {
        let rows = if self.total == 1 { "row" } else { "rows" };
        format!("Page {} of {} · {} {rows}", self.index + 1, self.count.max(1), self.total)
    }

    /// Zero-based page indices to render as buttons, centred on the
    /// current page where possible.
    pub fn window(&self) -> Vec<usize> {
        let count = self.count.max(1);
        let width = WINDOW.min(count);
        let start = self.index.saturating_sub(width / 2).min(count - width);
        (start..start + width).collect()
    }

    pub fn has_prev(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.count
    }
}

#[component]
pub fn Pagination(
    #[prop(into)] info: Signal<PageInfo>,
    on_page: Callback<usize>,
    on_page_size: Callback<usize>,
) -> impl IntoView {
    view! {
        <nav class="pagination" aria-label="Pagination">
            <label class="pagination__size">
                "Rows per page"
                <select on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                        on_page_size.run(size);
                    }
                }>
                    {PAGE_SIZES
                        .iter()
                        .map(|size| {
                            let size = *size;
                            view! {
                                <option value=size.to_string() selected=move || info.get().size == size>
                                    {size}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>
            <span class="pagination__label">{move || info.get().label()}</span>
            <button
                class="btn pagination__prev"
                disabled=move || !info.get().has_prev()
                on:click=move |_| on_page.run(info.get_untracked().index.saturating_sub(1))
            >
                "‹"
            </button>
            {move || {
                let current = info.get();
                current
                    .window()
                    .into_iter()
                    .map(|index| {
                        view! {
                            <button
                                class="btn pagination__page"
                                class:pagination__page--active=index == current.index
                                on:click=move |_| on_page.run(index)
                            >
                                {index + 1}
                            </button>
                        }
                    })
                    .collect_view()
            }}
            <button
                class="btn pagination__next"
                disabled=move || !info.get().has_next()
                on:click=move |_| on_page.run(info.get_untracked().index + 1)
            >
                "›"
            </button>
        </nav>
    }
}
