//! Feature implementations for tend.
//!
//! - Natural language due dates
//! - Recurring tasks

pub mod nlp;
pub mod recurrence;
