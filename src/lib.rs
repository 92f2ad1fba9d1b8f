pub mod collection;
pub mod config;
pub mod draft;
pub mod store;
pub mod task;
pub mod ui;

pub use collection::{numbered, order, NumberedTask, TaskIntent};
pub use draft::DraftTaskManager;
pub use store::{JsonTaskStore, StoreError, StoreResult, TaskStore};
pub use task::{DraftTask, Task, TaskId};
