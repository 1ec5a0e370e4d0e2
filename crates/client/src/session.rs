//! Client-side task state.
//!
//! [`Session`] reconciles three tiers: the server (authoritative), the
//! in-memory list it renders from, and the on-disk cache used for first
//! paint. The rules are deliberately simple: a fetch always replaces the
//! local list and cache wholesale (no merge), and a mutation is applied
//! locally only after the server has confirmed it, so a failed request
//! needs no rollback.
//!
//! Known limitation: two in-flight mutations against the same task race,
//! and the last response to complete wins. Single-user terminal use makes
//! this acceptable.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::api::TasksApi;
use crate::cache::TaskCache;
use crate::error::ClientError;
use tasklite_model::Task;

/// Which slice of the task list is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    /// Not yet completed.
    Active,
    Completed,
}

impl Filter {
    /// Does the filter admit this task?
    #[must_use]
    pub fn admits(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.is_completed,
            Self::Completed => task.is_completed,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// Client-side task list with a filter, an API adapter, and a cache.
pub struct Session {
    api: TasksApi,
    cache: TaskCache,
    tasks: Vec<Task>,
    filter: Filter,
}

impl Session {
    #[must_use]
    pub fn new(api: TasksApi, cache: TaskCache) -> Self {
        Self {
            api,
            cache,
            tasks: Vec::new(),
            filter: Filter::All,
        }
    }

    /// Populate the list from the cached snapshot, if one exists.
    ///
    /// First-paint only: whatever this loads is overwritten by the next
    /// successful [`refresh`](Self::refresh). Returns whether anything was
    /// loaded so the caller knows if there is something to render.
    pub fn load_cached(&mut self) -> bool {
        match self.cache.load() {
            Some(tasks) => {
                debug!(count = tasks.len(), "painting from cached snapshot");
                self.tasks = tasks;
                true
            }
            None => false,
        }
    }

    /// Fetch the full list from the server, replacing local state and cache.
    ///
    /// On a fetch failure the current list is left exactly as it was. A
    /// fetched list is applied unconditionally; the cache write afterwards
    /// is best effort.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let tasks = self.api.list().await?;
        self.tasks = tasks;
        self.persist();
        Ok(())
    }

    /// Add a task.
    ///
    /// An empty or whitespace-only description is rejected here, before any
    /// request goes out. Otherwise the server creates the record and the
    /// confirmed result is appended locally.
    pub async fn add(&mut self, description: &str) -> Result<Task, ClientError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ClientError::EmptyDescription);
        }

        let task = self.api.create(description).await?;
        self.tasks.push(task.clone());
        self.persist();
        Ok(task)
    }

    /// Flip a task's completion flag, server first.
    ///
    /// The flipped record is built locally, sent to the server, and spliced
    /// into the list by id only once the update is confirmed.
    pub async fn toggle(&mut self, id: Uuid) -> Result<(), ClientError> {
        let Some(task) = self.tasks.iter().find(|t| t.id == id) else {
            debug!(task_id = %id, "toggle target not in local list");
            return Ok(());
        };

        let updated = task.toggled();
        self.api.update(&updated).await?;

        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == id) {
            *slot = updated;
        }
        self.persist();
        Ok(())
    }

    /// Delete a task, server first, then drop it from the local list.
    pub async fn remove(&mut self, id: Uuid) -> Result<(), ClientError> {
        self.api.delete(id).await?;
        self.tasks.retain(|t| t.id != id);
        self.persist();
        Ok(())
    }

    /// Write the current list to the cache, best effort.
    ///
    /// The cache is a presentation snapshot only; a write failure must never
    /// surface as a failed flow once the server has confirmed the mutation.
    fn persist(&self) {
        if let Err(err) = self.cache.store(&self.tasks) {
            warn!(%err, "failed to write task cache");
        }
    }

    /// Switch the visible slice. Pure and synchronous; touches neither the
    /// network nor the cache.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    #[must_use]
    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Tasks admitted by the current filter, in list order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| self.filter.admits(t)).collect()
    }

    /// The full local list, unfiltered.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}
