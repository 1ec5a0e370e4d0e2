//! Typed HTTP adapter for the task API.
//!
//! A thin wrapper over the four `/api/tasks` calls. No retries, no caching,
//! no batching; transport failures and non-2xx statuses are handed back to
//! the caller unchanged.

use reqwest::Response;
use tracing::debug;
use uuid::Uuid;

use crate::error::ClientError;
use tasklite_model::{Task, TaskDraft};

/// Client for the task API at a fixed base URL.
#[derive(Debug, Clone)]
pub struct TasksApi {
    base_url: String,
    client: reqwest::Client,
}

impl TasksApi {
    /// Create an adapter for the given base URL (for example
    /// `http://127.0.0.1:8080`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Fetch every task.
    pub async fn list(&self) -> Result<Vec<Task>, ClientError> {
        let response = self.client.get(self.url("/api/tasks")).send().await?;
        let tasks = ok(response)?.json().await?;
        Ok(tasks)
    }

    /// Create a task from a description; the server mints the id and the
    /// completion flag starts false.
    pub async fn create(&self, description: &str) -> Result<Task, ClientError> {
        let draft = TaskDraft::new(description, false);
        let response = self
            .client
            .post(self.url("/api/tasks"))
            .json(&draft)
            .send()
            .await?;

        let task: Task = ok(response)?.json().await?;
        debug!(task_id = %task.id, "task created on server");
        Ok(task)
    }

    /// Overwrite a task's mutable fields with the given record.
    pub async fn update(&self, task: &Task) -> Result<(), ClientError> {
        let draft = TaskDraft::new(task.description.clone(), task.is_completed);
        let response = self
            .client
            .put(self.url(&format!("/api/tasks/{}", task.id)))
            .json(&draft)
            .send()
            .await?;

        ok(response)?;
        Ok(())
    }

    /// Delete a task by id.
    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/tasks/{id}")))
            .send()
            .await?;

        ok(response)?;
        Ok(())
    }
}

/// Map a non-success status to [`ClientError::Status`].
fn ok(response: Response) -> Result<Response, ClientError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(ClientError::Status {
            status: response.status(),
        })
    }
}
