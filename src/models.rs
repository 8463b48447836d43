//! Data Models
//!
//! Re-exported from `listapro-client` so components share one definition
//! with the controllers.

pub use listapro_client::{ListId, Task, TaskId, TaskList};
