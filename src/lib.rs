//! tend - natural language due dates and recurring tasks
//!
//! This crate turns phrases like "tomorrow", "in 2 weeks" or "every monday"
//! into calendar dates, pulls them out of task titles, and schedules the
//! next occurrence of recurring tasks when they are completed.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;
pub mod storage;
pub mod tasks;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::TendError;
