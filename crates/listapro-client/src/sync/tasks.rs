//! Task Panel Controller
//!
//! Holds the tasks of one list and keeps them responsive to input:
//! updates and deletes apply locally before the request resolves, and any
//! failure is repaired by refetching the list's tasks from the server.

use std::rc::Rc;

use tokio_util::sync::CancellationToken;

use super::collection::CollectionSnapshot;
use super::scope::{ChangeNotifier, Observed, Scope, SnapshotListener};
use super::state::SyncState;
use crate::api::TaskApi;
use crate::domain::{ListId, Task, TaskId, TaskList, TaskPatch};
use crate::error::{ApiError, ApiResult};

pub struct TaskListController<A: TaskApi> {
    api: Rc<A>,
    list_id: ListId,
    tasks: Observed<Task>,
    scope: Scope,
}

impl<A: TaskApi> TaskListController<A> {
    /// Seed with the tasks embedded in `list`; call `load` to refresh them.
    pub fn new(api: Rc<A>, list: &TaskList) -> Self {
        Self {
            api,
            list_id: list.id,
            tasks: Observed::new(list.tasks.clone()),
            scope: Scope::new(),
        }
    }

    pub fn with_listener(mut self, listener: SnapshotListener<Task>) -> Self {
        self.tasks.set_listener(listener);
        self
    }

    /// Callback run after every successful mutation (list counts changed)
    pub fn with_lists_change(mut self, notifier: ChangeNotifier) -> Self {
        self.scope.set_notifier(notifier);
        self
    }

    pub fn list_id(&self) -> ListId {
        self.list_id
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.read(|tasks| tasks.items().to_vec())
    }

    pub fn snapshot(&self) -> CollectionSnapshot<Task> {
        self.tasks.read(|tasks| tasks.snapshot())
    }

    pub fn state(&self, id: TaskId) -> SyncState {
        self.tasks.read(|tasks| tasks.state(id))
    }

    pub fn is_settled(&self) -> bool {
        self.tasks.read(|tasks| tasks.is_settled())
    }

    pub fn is_loading(&self) -> bool {
        self.tasks.read(|tasks| tasks.is_loading())
    }

    pub fn completed_count(&self) -> usize {
        self.tasks
            .read(|tasks| tasks.items().iter().filter(|t| t.is_completed).count())
    }

    /// Token cancelled by `dispose`; hand it to the view's cleanup hook.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.scope.token()
    }

    /// Stop applying responses; the view showing these tasks is gone.
    pub fn dispose(&self) {
        self.scope.dispose();
    }

    /// Replace local tasks with the server's. On failure nothing is committed.
    pub async fn load(&self) -> ApiResult<()> {
        let token = self.scope.begin_load();
        self.tasks.update(|tasks| tasks.set_loading(true));

        let result = self.api.fetch_tasks_by_list(self.list_id).await;
        if token.is_cancelled() {
            tracing::debug!(list_id = self.list_id, "discarding superseded task fetch");
            return result.map(|_| ());
        }

        match result {
            Ok(fetched) => {
                tracing::debug!(list_id = self.list_id, count = fetched.len(), "tasks loaded");
                self.tasks.update(|tasks| {
                    tasks.replace_all(fetched);
                    tasks.set_loading(false);
                });
                Ok(())
            }
            Err(err) => {
                tracing::error!(list_id = self.list_id, error = %err, "failed to load tasks");
                self.tasks.update(|tasks| tasks.set_loading(false));
                Err(err)
            }
        }
    }

    /// Create a task and append the server's record. Blank text is ignored.
    pub async fn create_task(&self, text: &str) -> ApiResult<Option<Task>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let token = self.scope.request();
        match self.api.create_task(self.list_id, text).await {
            Ok(task) => {
                if !token.is_cancelled() {
                    self.tasks.update(|tasks| tasks.push(task.clone()));
                    self.scope.notify();
                }
                Ok(Some(task))
            }
            Err(err) => {
                tracing::error!(list_id = self.list_id, error = %err, "failed to create task");
                if !token.is_cancelled() {
                    self.load().await.ok();
                }
                Err(err)
            }
        }
    }

    /// Optimistically apply `patch`. Returns `Ok(false)` when nothing was sent.
    pub async fn update_task(&self, id: TaskId, patch: TaskPatch) -> ApiResult<bool> {
        if patch.is_empty() {
            return Ok(false);
        }
        let applied = self.tasks.update(|tasks| tasks.apply(id, |task| task.apply(&patch)));
        if !applied {
            tracing::debug!(task_id = id, "update ignored, task not displayed");
            return Ok(false);
        }

        let token = self.scope.request();
        match self.api.update_task(id, &patch).await {
            Ok(_) => {
                if !token.is_cancelled() {
                    self.tasks.update(|tasks| tasks.confirm(id));
                    self.scope.notify();
                }
                Ok(true)
            }
            Err(err) => {
                self.revert(id, &token, &err, "update").await;
                Err(err)
            }
        }
    }

    pub async fn rename_task(&self, id: TaskId, text: &str) -> ApiResult<bool> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(false);
        }
        self.update_task(id, TaskPatch::text(text)).await
    }

    /// Flip the completion flag of a displayed task
    pub async fn toggle_task(&self, id: TaskId) -> ApiResult<bool> {
        let Some(done) = self.tasks.read(|tasks| tasks.get(id).map(|t| t.is_completed)) else {
            return Ok(false);
        };
        self.update_task(id, TaskPatch::completed(!done)).await
    }

    /// Remove locally right away, then delete on the server.
    pub async fn delete_task(&self, id: TaskId) -> ApiResult<()> {
        self.tasks.update(|tasks| tasks.remove(id));

        let token = self.scope.request();
        match self.api.delete_task(id).await {
            Ok(()) => {
                if !token.is_cancelled() {
                    self.tasks.update(|tasks| tasks.confirm(id));
                    self.scope.notify();
                }
                Ok(())
            }
            Err(err) => {
                self.revert(id, &token, &err, "delete").await;
                Err(err)
            }
        }
    }

    async fn revert(&self, id: TaskId, token: &CancellationToken, err: &ApiError, action: &str) {
        tracing::error!(task_id = id, error = %err, "failed to {} task, reloading", action);
        if token.is_cancelled() {
            return;
        }
        self.tasks.update(|tasks| tasks.reject(id));
        self.load().await.ok();
    }
}
