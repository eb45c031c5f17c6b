//! Command implementations for tend.
//!
//! This module contains the implementation of all CLI commands. Each command
//! returns the text to print; `main` does the printing.

mod add;
mod completions;
mod dates;
mod tasks;

pub use add::add;
pub use completions::completions;
pub use dates::{extract, parse, suggest};
pub use tasks::{delete, done, list, reopen, show};

use chrono::NaiveDate;

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::core::{Clock, SystemClock};
use crate::features::nlp::DateAssistant;

/// Everything a command needs besides its store.
#[derive(Debug, Clone)]
pub struct Context<C: Clock = SystemClock> {
    pub config: Config,
    pub format: OutputFormat,
    pub clock: C,
}

impl<C: Clock> Context<C> {
    #[must_use]
    pub const fn new(config: Config, format: OutputFormat, clock: C) -> Self {
        Self {
            config,
            format,
            clock,
        }
    }

    /// A date assistant bound to this context's clock and calendar policy.
    #[must_use]
    pub fn assistant(&self) -> DateAssistant<&C> {
        DateAssistant::new(&self.clock).with_policy(self.config.dates)
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}
