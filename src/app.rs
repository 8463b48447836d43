//! ListaPro Frontend App
//!
//! Two-column layout: list sidebar on the left, task panel on the right.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{NoListsState, SelectListPrompt, Sidebar, TaskPanel};
use crate::context::AppContext;
use crate::store::{AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    provide_context(store);

    let ctx = AppContext::new(store);
    provide_context(ctx);
    ctx.reload_lists();

    // Only a change of selection remounts the task panel; list reloads don't.
    let selected = Memo::new(move |_| store.selected_list_id().get());

    let main_content = move || match selected.get() {
        Some(id) => match ctx.lists().get(id) {
            Some(list) => view! { <TaskPanel list=list /> }.into_any(),
            None => view! { <SelectListPrompt /> }.into_any(),
        },
        None => {
            let no_lists = !store.lists_loading().get() && store.lists().read().is_empty();
            if no_lists {
                view! { <NoListsState /> }.into_any()
            } else {
                view! { <SelectListPrompt /> }.into_any()
            }
        }
    };

    view! {
        <div class="app-layout">
            <Sidebar />
            <main class="main-content">{main_content}</main>
        </div>
    }
}
