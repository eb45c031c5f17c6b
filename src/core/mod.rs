//! Core abstractions for tend.
//!
//! This module provides the clock abstraction and calendar helpers shared by
//! the date parser and the recurrence projector.

mod clock;
pub mod datetime;

pub use clock::{Clock, FixedClock, SystemClock};
pub use datetime::{parse_date_only, parse_timestamp};
