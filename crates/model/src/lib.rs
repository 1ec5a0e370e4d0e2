//! Shared wire types for the tasklite API.
//!
//! Both the server and the client speak the same JSON shape:
//! `{ "id": "<uuid>", "description": "...", "isCompleted": bool }`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tracked task, the sole domain entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server-minted identifier, immutable for the life of the task.
    pub id: Uuid,
    /// Free-form description text.
    pub description: String,
    /// Completion flag.
    pub is_completed: bool,
}

impl Task {
    /// Copy of this task with the completion flag flipped.
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            id: self.id,
            description: self.description.clone(),
            is_completed: !self.is_completed,
        }
    }
}

/// Mutable fields of a task, as sent in create and update requests.
///
/// There is no `id` field here: the server mints ids on create and the path
/// parameter names the target on update, so a client-supplied id in the body
/// is ignored by construction. Missing fields take explicit defaults rather
/// than relying on the deserializer's whims.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskDraft {
    pub description: String,
    pub is_completed: bool,
}

impl TaskDraft {
    #[must_use]
    pub fn new(description: impl Into<String>, is_completed: bool) -> Self {
        Self {
            description: description.into(),
            is_completed,
        }
    }
}
