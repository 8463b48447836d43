//! API Layer - Core Trait
//!
//! Defines the abstract interface to the ListaPro REST backend.
//! `HttpTaskApi` talks to the real service; tests plug in a fake.

mod http;

use async_trait::async_trait;

use crate::domain::{ListId, Task, TaskId, TaskList, TaskPatch};
use crate::error::ApiResult;

pub use http::HttpTaskApi;

/// One method per backend operation.
///
/// Every call issues exactly one request and forwards failures unchanged:
/// no retry, caching or queueing happens at this layer.
/// Futures are not `Send` because the browser transport is single-threaded.
#[async_trait(?Send)]
pub trait TaskApi {
    /// GET /lists
    async fn fetch_lists(&self) -> ApiResult<Vec<TaskList>>;

    /// POST /lists
    async fn create_list(&self, name: &str) -> ApiResult<TaskList>;

    /// PUT /lists/:id
    async fn update_list(&self, id: ListId, name: &str) -> ApiResult<TaskList>;

    /// DELETE /lists/:id
    async fn delete_list(&self, id: ListId) -> ApiResult<()>;

    /// GET /lists/:id/tasks
    async fn fetch_tasks_by_list(&self, list_id: ListId) -> ApiResult<Vec<Task>>;

    /// POST /lists/:id/tasks
    async fn create_task(&self, list_id: ListId, text: &str) -> ApiResult<Task>;

    /// PUT /tasks/:id with only the fields present in `patch`
    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> ApiResult<Task>;

    /// DELETE /tasks/:id
    async fn delete_task(&self, id: TaskId) -> ApiResult<()>;
}
