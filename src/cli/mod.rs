//! Command-line interface for tend.

pub mod args;
pub mod commands;
