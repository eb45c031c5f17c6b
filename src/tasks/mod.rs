//! Task records and the store they live in.

mod store;
mod types;

#[cfg(test)]
pub use store::MockTaskStore;
pub use store::TaskStore;
pub use types::{push_tag, TaskRecord, TaskSeed, RECURRING_TAG};
