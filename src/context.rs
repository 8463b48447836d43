//! Application Context
//!
//! Owns the lists controller and exposes fire-and-forget actions to
//! components. Failures are logged by the controller; views only see the
//! resulting state.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use listapro_client::{ListsController, SelectionListener, SnapshotListener};

use crate::api::{create_api, Api};
use crate::models::{ListId, TaskList};
use crate::store::{AppStateStoreFields, AppStore};

#[derive(Clone, Copy)]
pub struct AppContext {
    api: StoredValue<Rc<Api>, LocalStorage>,
    lists: StoredValue<Rc<ListsController<Api>>, LocalStorage>,
}

impl AppContext {
    pub fn new(store: AppStore) -> Self {
        let api = create_api();

        let on_snapshot: SnapshotListener<TaskList> = Rc::new(move |snapshot| {
            store.lists().set(snapshot.items.clone());
            store.lists_loading().set(snapshot.loading);
        });
        let on_select: SelectionListener = Rc::new(move |id| {
            store.selected_list_id().set(id);
        });
        let lists = ListsController::new(Rc::clone(&api))
            .with_listener(on_snapshot)
            .with_selection_listener(on_select);

        Self {
            api: StoredValue::new_local(api),
            lists: StoredValue::new_local(Rc::new(lists)),
        }
    }

    pub fn api(&self) -> Rc<Api> {
        self.api.get_value()
    }

    pub fn lists(&self) -> Rc<ListsController<Api>> {
        self.lists.get_value()
    }

    /// Refetch the sidebar lists
    pub fn reload_lists(&self) {
        let lists = self.lists();
        spawn_local(async move {
            let _ = lists.load().await;
        });
    }

    pub fn select_list(&self, id: Option<ListId>) {
        self.lists().select(id);
    }

    pub fn create_list(&self, name: String) {
        let lists = self.lists();
        spawn_local(async move {
            if let Ok(Some(list)) = lists.create_list(&name).await {
                tracing::info!(list_id = list.id, "list created");
            }
        });
    }

    pub fn rename_list(&self, id: ListId, name: String) {
        let lists = self.lists();
        spawn_local(async move {
            let _ = lists.rename_list(id, &name).await;
        });
    }

    pub fn delete_list(&self, id: ListId) {
        let lists = self.lists();
        spawn_local(async move {
            let _ = lists.delete_list(id).await;
        });
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
