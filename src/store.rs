//! Global Application State Store
//!
//! Mirrors the lists controller so views get field-level reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{ListId, TaskList};

#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Lists as last published by the lists controller (optimistic)
    pub lists: Vec<TaskList>,
    /// A list fetch is in flight
    pub lists_loading: bool,
    /// List shown in the task panel
    pub selected_list_id: Option<ListId>,
}

pub type AppStore = Store<AppState>;

pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Name of a list as currently displayed
pub fn store_list_name(store: &AppStore, id: ListId) -> Option<String> {
    store
        .lists()
        .read()
        .iter()
        .find(|list| list.id == id)
        .map(|list| list.name.clone())
}
