//! In-memory task store.
//!
//! Holds the authoritative task list for the process lifetime. The store
//! itself is a plain owned struct; callers provide the locking (see
//! [`crate::server::AppState`], which wraps it in an `RwLock` so concurrent
//! requests cannot race a mutation).

use tasklite_model::{Task, TaskDraft};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Errors that can occur when mutating the store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No task with the given id exists.
    #[error("no task with id {0}")]
    NotFound(Uuid),
}

/// Authoritative in-memory collection of tasks, in insertion order.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All tasks, oldest first. Infallible.
    #[must_use]
    pub fn list(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Append a new task with a freshly minted id and return it.
    ///
    /// Any id the client sent is already gone by this point: the request
    /// shape carries no id field.
    pub fn create(&mut self, draft: TaskDraft) -> Task {
        let task = Task {
            id: Uuid::new_v4(),
            description: draft.description,
            is_completed: draft.is_completed,
        };
        debug!(task_id = %task.id, "created task");
        self.tasks.push(task.clone());
        task
    }

    /// Overwrite the mutable fields of an existing task in place.
    ///
    /// The id and the task's position in the list never change. An empty
    /// description is accepted here; only the client's add flow rejects it.
    pub fn update(&mut self, id: Uuid, draft: TaskDraft) -> Result<(), StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;

        task.description = draft.description;
        task.is_completed = draft.is_completed;
        debug!(task_id = %id, "updated task");
        Ok(())
    }

    /// Remove every task with the given id (expected: zero or one).
    pub fn remove(&mut self, id: Uuid) -> Result<(), StoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);

        if self.tasks.len() == before {
            return Err(StoreError::NotFound(id));
        }
        debug!(task_id = %id, "removed task");
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
