//! Domain Layer
//!
//! Records mirroring the backend's JSON entities.

mod entity;
mod task;
mod task_list;

pub use entity::Entity;
pub use task::{Task, TaskId, TaskPatch};
pub use task_list::{ListId, TaskList};
