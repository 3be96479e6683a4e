//! Expanded-row content: detail lines, author, rich text and assets.
//!
//! SYSTEM CONTEXT
//! ==============
//! CMS rich text is only ever injected after `rich_text::sanitize`.

#[cfg(test)]
#[path = "detail_panel_test.rs"]
mod detail_panel_test;

use leptos::prelude::*;
use resources::format::{asset_url, format_datetime};
use resources::rich_text::sanitize;
use resources::{Cell, Record, TableRow};

use crate::net::api::api_base_url;

/// `Last updated 18 Okt 2026 07:05`, when the record carries the stamp.
pub fn updated_line(record: &Record) -> Option<String> {
    match record.cell("updated_at") {
        Cell::Time(ts) => Some(format!("Last updated {}", format_datetime(ts))),
        _ => None,
    }
}

#[component]
pub fn DetailPanel(record: Record) -> impl IntoView {
    let body = record.body_html.as_deref().map(sanitize).filter(|html| !html.is_empty());
    let updated = updated_line(&record);
    let base = api_base_url();

    view! {
        <div class="detail-panel">
            <dl class="detail-panel__facts">
                {record
                    .details
                    .into_iter()
                    .map(|(label, value)| view! {
                        <dt>{label}</dt>
                        <dd>{value}</dd>
                    })
                    .collect_view()}
            </dl>
            {record.author.map(|author| view! { <p class="detail-panel__author">"By " {author}</p> })}
            {body.map(|html| view! { <div class="detail-panel__body rich-text" inner_html=html></div> })}
            <div class="detail-panel__assets">
                {record
                    .assets
                    .into_iter()
                    .map(|asset| {
                        let url = asset_url(base, &asset.file_url);
                        let href = url.clone();
                        let alt = asset.title.unwrap_or_default();
                        view! {
                            <a class="detail-panel__asset" href=href target="_blank" rel="noopener noreferrer">
                                <img src=url alt=alt loading="lazy"/>
                            </a>
                        }
                    })
                    .collect_view()}
            </div>
            {updated.map(|line| view! { <p class="detail-panel__stamp">{line}</p> })}
        </div>
    }
}
