//! Storage layer for tend.
//!
//! Tasks are persisted in a local `SQLite` database behind the
//! [`TaskStore`](crate::tasks::TaskStore) trait.

mod database;
mod migrations;

pub use database::Database;
