//! In-memory backend for controller tests
//!
//! Behaves like the REST service (server-assigned ids, partial task updates,
//! cascading list deletes) and lets a test fail or delay the next call of a
//! given operation.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::api::TaskApi;
use crate::domain::{ListId, Task, TaskId, TaskList, TaskPatch};
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchLists,
    CreateList,
    UpdateList,
    DeleteList,
    FetchTasks,
    CreateTask,
    UpdateTask,
    DeleteTask,
}

#[derive(Default)]
struct State {
    lists: Vec<(ListId, String)>,
    tasks: Vec<Task>,
    last_list_id: ListId,
    last_task_id: TaskId,
    calls: HashMap<Operation, u32>,
    failures: HashSet<Operation>,
    holds: HashMap<Operation, Rc<Notify>>,
}

impl State {
    fn tasks_of(&self, list_id: ListId) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| t.list_id == list_id)
            .cloned()
            .collect()
    }

    fn list(&self, id: ListId) -> Option<TaskList> {
        self.lists
            .iter()
            .find(|(list_id, _)| *list_id == id)
            .map(|(id, name)| TaskList {
                id: *id,
                name: name.clone(),
                tasks: self.tasks_of(*id),
            })
    }

    fn insert_list(&mut self, name: &str) -> ListId {
        self.last_list_id += 1;
        self.lists.push((self.last_list_id, name.to_string()));
        self.last_list_id
    }

    fn insert_task(&mut self, list_id: ListId, text: &str) -> Task {
        self.last_task_id += 1;
        let task = Task {
            id: self.last_task_id,
            text: text.to_string(),
            is_completed: false,
            list_id,
        };
        self.tasks.push(task.clone());
        task
    }
}

fn not_found(what: &str, id: u64) -> ApiError {
    ApiError::Status {
        status: 404,
        body: format!("{} {} not found", what, id),
    }
}

#[derive(Default)]
pub struct FakeBackend {
    state: RefCell<State>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a list with tasks directly, bypassing call accounting
    pub fn seed_list(&self, name: &str, tasks: &[&str]) -> TaskList {
        let mut state = self.state.borrow_mut();
        let id = state.insert_list(name);
        for text in tasks {
            state.insert_task(id, text);
        }
        state.list(id).unwrap_or_else(|| TaskList {
            id,
            name: name.to_string(),
            tasks: Vec::new(),
        })
    }

    /// Simulate a change made by another client
    pub fn insert_task(&self, list_id: ListId, text: &str) -> Task {
        self.state.borrow_mut().insert_task(list_id, text)
    }

    pub fn task(&self, id: TaskId) -> Option<Task> {
        self.state.borrow().tasks.iter().find(|t| t.id == id).cloned()
    }

    pub fn tasks_of(&self, list_id: ListId) -> Vec<Task> {
        self.state.borrow().tasks_of(list_id)
    }

    pub fn calls(&self, op: Operation) -> u32 {
        self.state.borrow().calls.get(&op).copied().unwrap_or(0)
    }

    /// The next call of `op` answers HTTP 500 without touching any data
    pub fn fail_next(&self, op: Operation) {
        self.state.borrow_mut().failures.insert(op);
    }

    /// The next call of `op` is processed immediately but its response is
    /// withheld until the returned `Notify` fires.
    pub fn hold(&self, op: Operation) -> Rc<Notify> {
        let gate = Rc::new(Notify::new());
        self.state.borrow_mut().holds.insert(op, gate.clone());
        gate
    }

    fn call<T>(
        &self,
        op: Operation,
        f: impl FnOnce(&mut State) -> ApiResult<T>,
    ) -> (ApiResult<T>, Option<Rc<Notify>>) {
        let mut state = self.state.borrow_mut();
        *state.calls.entry(op).or_default() += 1;
        let gate = state.holds.remove(&op);
        let result = if state.failures.remove(&op) {
            Err(ApiError::Status {
                status: 500,
                body: "injected failure".to_string(),
            })
        } else {
            f(&mut state)
        };
        (result, gate)
    }

    async fn respond<T>((result, gate): (ApiResult<T>, Option<Rc<Notify>>)) -> ApiResult<T> {
        if let Some(gate) = gate {
            gate.notified().await;
        }
        result
    }
}

#[async_trait(?Send)]
impl TaskApi for FakeBackend {
    async fn fetch_lists(&self) -> ApiResult<Vec<TaskList>> {
        Self::respond(self.call(Operation::FetchLists, |state| {
            Ok(state
                .lists
                .iter()
                .filter_map(|(id, _)| state.list(*id))
                .collect())
        }))
        .await
    }

    async fn create_list(&self, name: &str) -> ApiResult<TaskList> {
        Self::respond(self.call(Operation::CreateList, |state| {
            let id = state.insert_list(name);
            state.list(id).ok_or_else(|| not_found("list", id))
        }))
        .await
    }

    async fn update_list(&self, id: ListId, name: &str) -> ApiResult<TaskList> {
        Self::respond(self.call(Operation::UpdateList, |state| {
            let entry = state
                .lists
                .iter_mut()
                .find(|(list_id, _)| *list_id == id)
                .ok_or_else(|| not_found("list", id))?;
            entry.1 = name.to_string();
            state.list(id).ok_or_else(|| not_found("list", id))
        }))
        .await
    }

    async fn delete_list(&self, id: ListId) -> ApiResult<()> {
        Self::respond(self.call(Operation::DeleteList, |state| {
            let before = state.lists.len();
            state.lists.retain(|(list_id, _)| *list_id != id);
            if state.lists.len() == before {
                return Err(not_found("list", id));
            }
            state.tasks.retain(|t| t.list_id != id);
            Ok(())
        }))
        .await
    }

    async fn fetch_tasks_by_list(&self, list_id: ListId) -> ApiResult<Vec<Task>> {
        Self::respond(self.call(Operation::FetchTasks, |state| Ok(state.tasks_of(list_id)))).await
    }

    async fn create_task(&self, list_id: ListId, text: &str) -> ApiResult<Task> {
        Self::respond(self.call(Operation::CreateTask, |state| {
            if state.list(list_id).is_none() {
                return Err(not_found("list", list_id));
            }
            Ok(state.insert_task(list_id, text))
        }))
        .await
    }

    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> ApiResult<Task> {
        Self::respond(self.call(Operation::UpdateTask, |state| {
            let task = state
                .tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| not_found("task", id))?;
            task.apply(patch);
            Ok(task.clone())
        }))
        .await
    }

    async fn delete_task(&self, id: TaskId) -> ApiResult<()> {
        Self::respond(self.call(Operation::DeleteTask, |state| {
            let before = state.tasks.len();
            state.tasks.retain(|t| t.id != id);
            if state.tasks.len() == before {
                return Err(not_found("task", id));
            }
            Ok(())
        }))
        .await
    }
}
