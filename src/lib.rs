pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod projection;
pub mod store;
pub mod tui;

pub use error::{Error, Result};
pub use models::{Priority, Task, TaskId, TaskList};
pub use store::{StoreEvent, TaskStore};
