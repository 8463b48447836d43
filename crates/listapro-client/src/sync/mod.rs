//! Optimistic state layer
//!
//! Local copies of lists and tasks that change before the backend answers
//! and converge back to the backend's state once each request settles.

mod collection;
mod lists;
mod scope;
mod state;
mod tasks;

pub use collection::{CollectionSnapshot, OptimisticCollection};
pub use lists::{ListsController, SelectionListener};
pub use scope::{ChangeNotifier, SnapshotListener};
pub use state::{SyncEvent, SyncState};
pub use tasks::TaskListController;
