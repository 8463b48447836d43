//! Task Entity
//!
//! A single to-do entry owned by exactly one task list.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::task_list::ListId;

/// Server-assigned task identifier
pub type TaskId = u64;

/// Task record as returned by the backend (capitalized JSON keys)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "ID")]
    pub id: TaskId,
    #[serde(rename = "Text")]
    pub text: String,
    #[serde(rename = "IsCompleted", default)]
    pub is_completed: bool,
    #[serde(rename = "ListID")]
    pub list_id: ListId,
}

impl Task {
    /// Apply every field present in `patch`
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
        if let Some(done) = patch.is_completed {
            self.is_completed = done;
        }
    }
}

impl Entity for Task {
    type Id = TaskId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Partial task update. The backend merges the fields that are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(rename = "Text", skip_serializing_if = "Option::is_none", default)]
    pub text: Option<String>,
    #[serde(rename = "IsCompleted", skip_serializing_if = "Option::is_none", default)]
    pub is_completed: Option<bool>,
}

impl TaskPatch {
    /// Patch touching only the text
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Patch touching only the completion flag
    pub fn completed(is_completed: bool) -> Self {
        Self {
            is_completed: Some(is_completed),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.is_completed.is_none()
    }
}
