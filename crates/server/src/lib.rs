//! REST backend for the tasklite task tracker.
//!
//! The authoritative task list lives in [`store::TaskStore`], held for the
//! process lifetime behind a lock in [`server::AppState`]. Nothing is
//! persisted; a restart starts empty.

pub mod config;
pub mod server;
pub mod store;

pub use config::ServerConfig;
pub use server::{build_router, AppState};
pub use store::{StoreError, TaskStore};
