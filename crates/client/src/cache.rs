//! Durable snapshot of the last-known task list.
//!
//! The client's equivalent of a browser's local storage: a JSON file holding
//! the task array as last seen from the server. It is a presentation cache
//! only, read once at startup for first paint and overwritten after every
//! successful fetch or mutation. The server never sees it.

use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::{debug, warn};

use tasklite_model::Task;

/// Environment variable overriding the cache file location.
const ENV_CACHE_PATH: &str = "TASKLITE_CACHE_PATH";

/// On-disk task snapshot at a fixed path.
#[derive(Debug, Clone)]
pub struct TaskCache {
    path: Option<PathBuf>,
}

impl TaskCache {
    /// Resolve the cache location: the `TASKLITE_CACHE_PATH` override if set,
    /// otherwise the platform cache directory. A `None` path disables the
    /// cache rather than failing the client.
    #[must_use]
    pub fn from_env() -> Self {
        let path = std::env::var(ENV_CACHE_PATH).map(PathBuf::from).ok().or_else(|| {
            ProjectDirs::from("com", "5dlabs", "tasklite")
                .map(|dirs| dirs.cache_dir().join("tasks.json"))
        });

        if path.is_none() {
            warn!("No cache directory available; running without a local snapshot");
        }

        Self { path }
    }

    /// Cache backed by an explicit file path.
    #[must_use]
    pub fn at(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// Read the cached snapshot, if any.
    ///
    /// Best effort by design: a missing file, unreadable file, or stale
    /// unparseable payload all yield `None` silently. The cache only feeds
    /// the first paint and is overwritten by the next fetch.
    #[must_use]
    pub fn load(&self) -> Option<Vec<Task>> {
        let path = self.path.as_ref()?;
        let raw = std::fs::read_to_string(path).ok()?;

        match serde_json::from_str(&raw) {
            Ok(tasks) => {
                debug!(path = %path.display(), "loaded cached task snapshot");
                Some(tasks)
            }
            Err(err) => {
                debug!(path = %path.display(), %err, "ignoring unparseable cache");
                None
            }
        }
    }

    /// Overwrite the snapshot with the given task list.
    ///
    /// Callers treat a failure here as a logging matter, never as a failed
    /// flow: the cache is subordinate to whatever state it is mirroring.
    pub fn store(&self, tasks: &[Task]) -> io::Result<()> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string(tasks)?)?;
        debug!(path = %path.display(), count = tasks.len(), "cache updated");
        Ok(())
    }
}
