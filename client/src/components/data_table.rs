//! Resource table: filter, sort, paginate, expand, select, export.
//!
//! DESIGN
//! ======
//! All table behavior lives in `resources::ResourceList`; this component only
//! renders the current view and turns clicks into state updates. Deletion is
//! delegated to the page through `on_delete` so it can confirm, call the API,
//! toast and refetch.

#[cfg(test)]
#[path = "data_table_test.rs"]
mod data_table_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use resources::table::{SortDirection, TableRow, TableState};
use resources::ResourceList;

use crate::components::detail_panel::DetailPanel;
use crate::components::pagination::{PageInfo, Pagination};
use crate::util::download::download_csv;

/// Arrow for the header of the sorted column.
pub fn sort_indicator(table: &TableState, column: &str) -> &'static str {
    match table.sort() {
        Some(spec) if spec.column == column => match spec.direction {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        },
        _ => "",
    }
}

/// Label for the bulk-action buttons.
pub fn target_label(selected: usize) -> String {
    match selected {
        0 => "all".to_owned(),
        n => format!("{n} selected"),
    }
}

fn page_info(list: &ResourceList) -> PageInfo {
    let view = list.view();
    PageInfo {
        index: view.page_index,
        count: view.page_count,
        total: view.total,
        size: list.table.page_size(),
    }
}

#[component]
pub fn DataTable(list: RwSignal<ResourceList>, on_delete: Callback<Vec<i64>>) -> impl IntoView {
    let kind = list.with_untracked(ResourceList::kind);
    let columns = kind.columns();
    // Checkbox, data columns, actions.
    let span = (columns.len() + 2).to_string();

    let info = Signal::derive(move || list.with(page_info));
    let selected_count = move || list.with(|l| l.table.visible_selection(l.records()).len());
    let has_selection = move || list.with(|l| !l.table.selected_ids().is_empty());
    let all_selected = move || {
        list.with(|l| {
            let total = l.view().total;
            total > 0 && l.table.visible_selection(l.records()).len() >= total
        })
    };

    let on_page = Callback::new(move |index: usize| list.update(|l| l.table.set_page(index)));
    let on_page_size = Callback::new(move |size: usize| {
        list.update(|l| {
            let _ = l.table.set_page_size(size);
        });
    });
    let on_export = move |_| {
        list.with_untracked(|l| {
            let rows = l.table.selected_or_all(l.records());
            download_csv(kind, &rows);
        });
    };
    let on_bulk_delete = move |_| {
        let ids = list.with_untracked(|l| l.table.visible_selection(l.records()));
        if !ids.is_empty() {
            on_delete.run(ids);
        }
    };

    view! {
        <div class="data-table">
            <div class="data-table__toolbar">
                <select
                    class="data-table__filter-column"
                    on:change=move |ev| list.update(|l| l.table.set_filter_column(&event_target_value(&ev)))
                >
                    {columns
                        .iter()
                        .map(|column| {
                            let key = column.key;
                            view! {
                                <option
                                    value=key
                                    selected=move || list.with(|l| l.table.filter_column() == key)
                                >
                                    {column.label}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <input
                    class="data-table__filter"
                    type="search"
                    placeholder=format!("Filter {}...", kind.label().to_lowercase())
                    prop:value=move || list.with(|l| l.table.filter().to_owned())
                    on:input=move |ev| list.update(|l| l.table.set_filter(&event_target_value(&ev)))
                />
                <span class="toolbar__spacer"></span>
                <Show when=has_selection>
                    <button class="btn" on:click=move |_| list.update(|l| l.table.clear_selection())>
                        "Clear selection"
                    </button>
                </Show>
                <button class="btn" on:click=on_export>
                    {move || format!("Export CSV ({})", target_label(selected_count()))}
                </button>
                <button
                    class="btn btn--danger"
                    disabled=move || selected_count() == 0
                    on:click=on_bulk_delete
                >
                    {move || format!("Delete ({})", selected_count())}
                </button>
                <a class="btn btn--primary" href=format!("{}/new", kind.route())>
                    {format!("New {}", kind.singular())}
                </a>
            </div>

            <table class="data-table__table">
                <thead>
                    <tr>
                        <th class="data-table__check">
                            <input
                                type="checkbox"
                                title="Select all"
                                prop:checked=all_selected
                                on:change=move |ev| {
                                    if event_target_checked(&ev) {
                                        list.update(ResourceList::select_all_filtered);
                                    } else {
                                        list.update(|l| l.table.clear_selection());
                                    }
                                }
                            />
                        </th>
                        {columns
                            .iter()
                            .map(|column| {
                                let key = column.key;
                                if column.sortable {
                                    view! {
                                        <th
                                            class="data-table__sortable"
                                            on:click=move |_| list.update(|l| l.table.toggle_sort(key))
                                        >
                                            {column.label}
                                            " "
                                            <span class="data-table__sort">
                                                {move || list.with(|l| sort_indicator(&l.table, key))}
                                            </span>
                                        </th>
                                    }
                                        .into_any()
                                } else {
                                    view! { <th>{column.label}</th> }.into_any()
                                }
                            })
                            .collect_view()}
                        <th class="data-table__actions">"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let span = span.clone();
                        list.with(|l| {
                            let view = l.view();
                            if view.rows.is_empty() {
                                let message = if l.state().is_loading() { "Loading..." } else { "No records." };
                                return view! {
                                    <tr>
                                        <td class="data-table__empty" colspan=span>{message}</td>
                                    </tr>
                                }
                                    .into_any();
                            }
                            view.rows
                                .into_iter()
                                .map(|record| {
                                    let id = record.row_id();
                                    let selected = l.table.is_selected(id);
                                    let expanded = l.table.is_expanded(id);
                                    let cells: Vec<String> =
                                        columns.iter().map(|column| record.cell(column.key).display()).collect();
                                    let detail = expanded.then(|| record.clone());
                                    let span = span.clone();
                                    view! {
                                        <tr class="data-table__row" class:data-table__row--selected=selected>
                                            <td class="data-table__check">
                                                <input
                                                    type="checkbox"
                                                    prop:checked=selected
                                                    on:change=move |_| list.update(|l| l.table.toggle_selected(id))
                                                />
                                            </td>
                                            {cells.into_iter().map(|text| view! { <td>{text}</td> }).collect_view()}
                                            <td class="data-table__actions">
                                                <button
                                                    class="btn"
                                                    on:click=move |_| list.update(|l| l.table.toggle_expanded(id))
                                                >
                                                    {if expanded { "Hide" } else { "Details" }}
                                                </button>
                                                <a class="btn" href=format!("{}/{id}/edit", kind.route())>
                                                    "Edit"
                                                </a>
                                                <button class="btn btn--danger" on:click=move |_| on_delete.run(vec![id])>
                                                    "Delete"
                                                </button>
                                            </td>
                                        </tr>
                                        {detail.map(|record| view! {
                                            <tr class="data-table__detail">
                                                <td colspan=span>
                                                    <DetailPanel record=record/>
                                                </td>
                                            </tr>
                                        })}
                                    }
                                })
                                .collect_view()
                                .into_any()
                        })
                    }}
                </tbody>
            </table>

            <Pagination info=info on_page=on_page on_page_size=on_page_size/>
        </div>
    }
}
