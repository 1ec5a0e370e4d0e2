//! Terminal frontend for the tasklite task tracker.
//!
//! The moving parts: [`api::TasksApi`] talks to the server, [`cache::TaskCache`]
//! keeps the last-known list on disk for first paint, and [`session::Session`]
//! reconciles the two into the list the terminal renders.

pub mod api;
pub mod cache;
pub mod error;
pub mod session;

pub use api::TasksApi;
pub use cache::TaskCache;
pub use error::ClientError;
pub use session::{Filter, Session};
