//! Lists Controller
//!
//! Sidebar state: every task list plus the current selection.
//! Creation refetches the whole collection; rename and delete are optimistic.

use std::cell::Cell;
use std::rc::Rc;

use tokio_util::sync::CancellationToken;

use super::collection::CollectionSnapshot;
use super::scope::{ChangeNotifier, Observed, Scope, SnapshotListener};
use super::state::SyncState;
use crate::api::TaskApi;
use crate::domain::{ListId, TaskList};
use crate::error::{ApiError, ApiResult};

/// Receives the selected list id whenever it changes
pub type SelectionListener = Rc<dyn Fn(Option<ListId>)>;

pub struct ListsController<A: TaskApi> {
    api: Rc<A>,
    lists: Observed<TaskList>,
    selected: Cell<Option<ListId>>,
    on_select: Option<SelectionListener>,
    scope: Scope,
}

impl<A: TaskApi> ListsController<A> {
    pub fn new(api: Rc<A>) -> Self {
        Self {
            api,
            lists: Observed::new(Vec::new()),
            selected: Cell::new(None),
            on_select: None,
            scope: Scope::new(),
        }
    }

    pub fn with_listener(mut self, listener: SnapshotListener<TaskList>) -> Self {
        self.lists.set_listener(listener);
        self
    }

    pub fn with_selection_listener(mut self, listener: SelectionListener) -> Self {
        self.on_select = Some(listener);
        self
    }

    pub fn with_lists_change(mut self, notifier: ChangeNotifier) -> Self {
        self.scope.set_notifier(notifier);
        self
    }

    pub fn lists(&self) -> Vec<TaskList> {
        self.lists.read(|lists| lists.items().to_vec())
    }

    pub fn snapshot(&self) -> CollectionSnapshot<TaskList> {
        self.lists.read(|lists| lists.snapshot())
    }

    pub fn get(&self, id: ListId) -> Option<TaskList> {
        self.lists.read(|lists| lists.get(id).cloned())
    }

    pub fn state(&self, id: ListId) -> SyncState {
        self.lists.read(|lists| lists.state(id))
    }

    pub fn is_loading(&self) -> bool {
        self.lists.read(|lists| lists.is_loading())
    }

    /// Task count shown next to a list in the sidebar
    pub fn task_count(&self, id: ListId) -> usize {
        self.lists
            .read(|lists| lists.get(id).map(TaskList::task_count).unwrap_or(0))
    }

    pub fn selected_id(&self) -> Option<ListId> {
        self.selected.get()
    }

    /// The selected list, if it is still held locally
    pub fn selected(&self) -> Option<TaskList> {
        self.selected.get().and_then(|id| self.get(id))
    }

    pub fn select(&self, id: Option<ListId>) {
        if self.selected.replace(id) == id {
            return;
        }
        if let Some(listener) = &self.on_select {
            listener(id);
        }
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.scope.token()
    }

    pub fn dispose(&self) {
        self.scope.dispose();
    }

    pub async fn load(&self) -> ApiResult<()> {
        let token = self.scope.begin_load();
        self.lists.update(|lists| lists.set_loading(true));

        let result = self.api.fetch_lists().await;
        if token.is_cancelled() {
            tracing::debug!("discarding superseded list fetch");
            return result.map(|_| ());
        }

        match result {
            Ok(fetched) => {
                tracing::debug!(count = fetched.len(), "lists loaded");
                self.lists.update(|lists| {
                    lists.replace_all(fetched);
                    lists.set_loading(false);
                });
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load lists");
                self.lists.update(|lists| lists.set_loading(false));
                Err(err)
            }
        }
    }

    /// Create a list, then refetch all lists. Blank names are ignored.
    pub async fn create_list(&self, name: &str) -> ApiResult<Option<TaskList>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let token = self.scope.request();
        match self.api.create_list(name).await {
            Ok(list) => {
                if !token.is_cancelled() {
                    self.load().await.ok();
                    self.scope.notify();
                }
                Ok(Some(list))
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to create list");
                Err(err)
            }
        }
    }

    /// Optimistically rename. Returns `Ok(false)` when nothing was sent.
    pub async fn rename_list(&self, id: ListId, name: &str) -> ApiResult<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }
        let applied = self
            .lists
            .update(|lists| lists.apply(id, |list| list.name = name.to_string()));
        if !applied {
            tracing::debug!(list_id = id, "rename ignored, list not displayed");
            return Ok(false);
        }

        let token = self.scope.request();
        match self.api.update_list(id, name).await {
            Ok(_) => {
                self.settle(id, &token);
                Ok(true)
            }
            Err(err) => {
                self.revert(id, &token, &err, "rename").await;
                Err(err)
            }
        }
    }

    /// Optimistically remove. The selection is cleared once the server
    /// confirms, so a failed delete leaves the user on the restored list.
    pub async fn delete_list(&self, id: ListId) -> ApiResult<()> {
        self.lists.update(|lists| lists.remove(id));

        let token = self.scope.request();
        match self.api.delete_list(id).await {
            Ok(()) => {
                if !token.is_cancelled() && self.selected.get() == Some(id) {
                    self.select(None);
                }
                self.settle(id, &token);
                Ok(())
            }
            Err(err) => {
                self.revert(id, &token, &err, "delete").await;
                Err(err)
            }
        }
    }

    fn settle(&self, id: ListId, token: &CancellationToken) {
        if token.is_cancelled() {
            return;
        }
        self.lists.update(|lists| lists.confirm(id));
        self.scope.notify();
    }

    async fn revert(&self, id: ListId, token: &CancellationToken, err: &ApiError, action: &str) {
        tracing::error!(list_id = id, error = %err, "failed to {} list, reloading", action);
        if token.is_cancelled() {
            return;
        }
        self.lists.update(|lists| lists.reject(id));
        self.load().await.ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeBackend, Operation};
    use std::cell::RefCell;

    fn setup() -> (Rc<FakeBackend>, ListsController<FakeBackend>) {
        let backend = Rc::new(FakeBackend::new());
        backend.seed_list("Lista 1", &["Tarefa 1"]);
        let controller = ListsController::new(backend.clone());
        (backend, controller)
    }

    #[tokio::test]
    async fn test_create_then_fetch_contains_new_list() {
        let (_backend, controller) = setup();
        controller.load().await.unwrap();

        let created = controller.create_list("Nova Lista").await.unwrap().unwrap();
        assert!(created.id > 0);
        let lists = controller.lists();
        assert!(lists.iter().any(|l| l.id == created.id && l.name == "Nova Lista"));
    }

    #[tokio::test]
    async fn test_blank_name_is_ignored() {
        let (backend, controller) = setup();
        assert_eq!(controller.create_list("  ").await.unwrap(), None);
        assert!(!controller.rename_list(1, "").await.unwrap());
        assert_eq!(backend.calls(Operation::CreateList), 0);
        assert_eq!(backend.calls(Operation::UpdateList), 0);
    }

    #[tokio::test]
    async fn test_create_failure_leaves_lists_untouched() {
        let (backend, controller) = setup();
        controller.load().await.unwrap();
        backend.fail_next(Operation::CreateList);

        assert!(controller.create_list("Nova Lista").await.is_err());
        assert_eq!(controller.lists().len(), 1);
    }

    #[tokio::test]
    async fn test_rename_is_optimistic_and_reverts_on_failure() {
        let (backend, controller) = setup();
        controller.load().await.unwrap();
        let id = controller.lists()[0].id;

        assert!(controller.rename_list(id, "Renomeada").await.unwrap());
        assert_eq!(controller.get(id).unwrap().name, "Renomeada");

        backend.fail_next(Operation::UpdateList);
        assert!(controller.rename_list(id, "Falha").await.is_err());
        assert_eq!(controller.get(id).unwrap().name, "Renomeada");
        assert!(controller.state(id).is_synced());
    }

    #[tokio::test]
    async fn test_delete_clears_selection_and_notifies() {
        let (backend, controller) = setup();
        let changes = Rc::new(Cell::new(0));
        let selections = Rc::new(RefCell::new(Vec::new()));
        let (c, s) = (changes.clone(), selections.clone());
        let controller = controller
            .with_lists_change(Rc::new(move || c.set(c.get() + 1)))
            .with_selection_listener(Rc::new(move |id| s.borrow_mut().push(id)));
        controller.load().await.unwrap();
        let id = controller.lists()[0].id;
        controller.select(Some(id));

        controller.delete_list(id).await.unwrap();
        assert!(controller.lists().is_empty());
        assert_eq!(controller.selected_id(), None);
        assert_eq!(*selections.borrow(), vec![Some(id), None]);
        assert_eq!(changes.get(), 1);

        controller.load().await.unwrap();
        assert!(controller.lists().iter().all(|l| l.id != id));
        assert!(backend.tasks_of(id).is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_restores_list() {
        let (backend, controller) = setup();
        controller.load().await.unwrap();
        let id = controller.lists()[0].id;
        backend.fail_next(Operation::DeleteList);

        assert!(controller.delete_list(id).await.is_err());
        assert!(controller.get(id).is_some());
        assert_eq!(controller.task_count(id), 1);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_selection() {
        let (backend, controller) = setup();
        controller.load().await.unwrap();
        let id = controller.lists()[0].id;
        controller.select(Some(id));
        backend.fail_next(Operation::DeleteList);

        assert!(controller.delete_list(id).await.is_err());
        assert!(controller.get(id).is_some());
        assert_eq!(controller.selected_id(), Some(id));
        assert_eq!(controller.selected().map(|l| l.name), Some("Lista 1".to_string()));
    }

    #[tokio::test]
    async fn test_selection_kept_until_delete_confirmed() {
        let (backend, controller) = setup();
        controller.load().await.unwrap();
        let id = controller.lists()[0].id;
        controller.select(Some(id));
        let gate = backend.hold(Operation::DeleteList);

        let observe = async {
            tokio::task::yield_now().await;
            assert!(controller.get(id).is_none());
            assert_eq!(controller.selected_id(), Some(id));
            gate.notify_one();
        };
        let (result, ()) = tokio::join!(controller.delete_list(id), observe);
        result.unwrap();
        assert_eq!(controller.selected_id(), None);
    }

    #[tokio::test]
    async fn test_create_notifies_lists_change() {
        let (_backend, controller) = setup();
        let changes = Rc::new(Cell::new(0));
        let c = changes.clone();
        let controller = controller.with_lists_change(Rc::new(move || c.set(c.get() + 1)));

        controller.create_list("Nova Lista").await.unwrap();
        assert_eq!(changes.get(), 1);

        controller.create_list("   ").await.unwrap();
        assert_eq!(changes.get(), 1);
    }

    #[tokio::test]
    async fn test_rename_notifies_only_on_success() {
        let (backend, controller) = setup();
        let changes = Rc::new(Cell::new(0));
        let c = changes.clone();
        let controller = controller.with_lists_change(Rc::new(move || c.set(c.get() + 1)));
        controller.load().await.unwrap();
        let id = controller.lists()[0].id;

        controller.rename_list(id, "Renomeada").await.unwrap();
        assert_eq!(changes.get(), 1);

        backend.fail_next(Operation::UpdateList);
        assert!(controller.rename_list(id, "Falha").await.is_err());
        assert_eq!(changes.get(), 1);
    }

    #[tokio::test]
    async fn test_failed_load_commits_nothing() {
        let (backend, controller) = setup();
        controller.load().await.unwrap();
        backend.fail_next(Operation::FetchLists);

        assert!(controller.load().await.is_err());
        assert_eq!(controller.lists().len(), 1);
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_selected_follows_reload() {
        let (_backend, controller) = setup();
        controller.load().await.unwrap();
        let id = controller.lists()[0].id;
        controller.select(Some(id));
        assert_eq!(controller.selected().map(|l| l.name), Some("Lista 1".to_string()));
        controller.select(Some(999));
        assert!(controller.selected().is_none());
    }
}
