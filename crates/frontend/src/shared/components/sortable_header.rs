//! Table header cell that sorts on click

use crate::shared::list_utils::{create_sort_toggle, get_sort_indicator};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn SortableHeaderCell(
    #[prop(into)] label: String,
    /// Field passed to `Sortable::compare_by_field`
    field: &'static str,
    sort_field: RwSignal<String>,
    sort_ascending: RwSignal<bool>,
) -> impl IntoView {
    let on_click = create_sort_toggle(field, sort_field, sort_ascending);

    view! {
        <TableHeaderCell>
            <span class="table__sortable-header" on:click=on_click>
                {label}
                <span class="table__sort-indicator">
                    {move || get_sort_indicator(&sort_field.get(), field, sort_ascending.get())}
                </span>
            </span>
        </TableHeaderCell>
    }
}
