//! ListaPro Client Core
//!
//! Layered architecture:
//! - domain: task and list records exchanged with the REST backend
//! - api: the `TaskApi` seam and its reqwest implementation
//! - sync: optimistic collections and the list/task controllers built on them

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod sync;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use api::{HttpTaskApi, TaskApi};
pub use config::ApiConfig;
pub use domain::{Entity, ListId, Task, TaskId, TaskList, TaskPatch};
pub use error::{ApiError, ApiResult};
pub use sync::{
    ChangeNotifier, CollectionSnapshot, ListsController, OptimisticCollection, SelectionListener,
    SnapshotListener, SyncEvent, SyncState, TaskListController,
};
