//! TaskList Entity
//!
//! A named collection of tasks. Deleting a list cascades server-side.

use serde::{Deserialize, Deserializer, Serialize};

use super::entity::Entity;
use super::task::Task;

/// Server-assigned list identifier
pub type ListId = u64;

/// Task list record as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    #[serde(rename = "ID")]
    pub id: ListId,
    #[serde(rename = "Name")]
    pub name: String,
    /// Embedded tasks; the backend may send `null` or omit them
    #[serde(rename = "Tasks", default, deserialize_with = "null_as_empty")]
    pub tasks: Vec<Task>,
}

impl TaskList {
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_completed).count()
    }
}

impl Entity for TaskList {
    type Id = ListId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Task>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Task>>::deserialize(deserializer)?.unwrap_or_default())
}
