//! Sidebar Component
//!
//! "Minhas Listas": every list with its task count, plus create, rename,
//! delete and selection.

use leptos::prelude::*;

use super::{DeleteConfirmButton, EditableText, NewEntryForm};
use crate::context::use_app_context;
use crate::models::TaskList;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let show_loading = move || store.lists_loading().get() && store.lists().read().is_empty();
    let show_empty = move || !store.lists_loading().get() && store.lists().read().is_empty();

    view! {
        <aside class="sidebar">
            <div class="sidebar-header">
                <h2 class="sidebar-title" on:click=move |_| ctx.select_list(None)>
                    "Minhas Listas"
                </h2>
            </div>

            <NewEntryForm
                class="new-list-form"
                placeholder="Nova lista..."
                button_label="+"
                on_submit=Callback::new(move |name: String| ctx.create_list(name))
            />

            <Show when=show_loading>
                <p class="sidebar-message">"Carregando..."</p>
            </Show>
            <Show when=show_empty>
                <p class="sidebar-message">"Nenhuma lista ainda"</p>
            </Show>

            <ul class="list-nav">
                <For
                    each=move || store.lists().get()
                    key=|list| (list.id, list.name.clone(), list.task_count())
                    children=move |list| view! { <ListRow list=list /> }
                />
            </ul>
        </aside>
    }
}

#[component]
fn ListRow(list: TaskList) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let id = list.id;
    let task_count = list.task_count();
    let is_selected = move || store.selected_list_id().get() == Some(id);

    view! {
        <li
            class=move || if is_selected() { "list-item active" } else { "list-item" }
            on:click=move |_| ctx.select_list(Some(id))
        >
            <EditableText
                text=list.name
                class="list-name"
                on_commit=Callback::new(move |name: String| ctx.rename_list(id, name))
            />
            <span class="list-count">{task_count}</span>
            <DeleteConfirmButton
                button_class="delete-btn"
                on_confirm=Callback::new(move |_: ()| ctx.delete_list(id))
            />
        </li>
    }
}
