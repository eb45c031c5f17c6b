use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "tend")]
#[command(about = "A task list that understands dates written in plain English")]
#[command(long_about = "tend - natural language due dates and recurring tasks

Type dates the way you say them. tend finds phrases like \"tomorrow\",
\"in 2 weeks\" or \"every monday\" inside task titles, turns them into due
dates, and schedules the next occurrence when a recurring task is done.

QUICK START:
  tend add \"Buy groceries tomorrow\"     Add a task due tomorrow
  tend add \"Pay rent\" --every monthly   Add a monthly task
  tend list                             Show open tasks
  tend done 3                           Complete task 3
  tend parse \"end of next week\"         Try out a date phrase

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  tend <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output, or 'json' for
    /// machine-readable output suitable for scripting. Defaults to the
    /// `general.default_output` config setting.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Directory holding config.yaml and tend.db (default: ~/.tend)
    #[arg(long, env = "TEND_HOME", global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a date phrase
    ///
    /// Resolves a standalone phrase to a date. Partial input such as "nex"
    /// lists the phrases it could complete to.
    ///
    /// # Examples
    ///
    ///   tend parse tomorrow
    ///   tend parse "end of next week"
    ///   tend parse "in 3 days" -o json
    #[command(alias = "p")]
    Parse {
        /// The phrase to parse
        text: String,
    },

    /// Suggest date phrases for partial input
    ///
    /// # Examples
    ///
    ///   tend suggest nex
    ///   tend suggest every
    Suggest {
        /// What has been typed so far
        partial: String,
    },

    /// Show how a task title would be split into title and due date
    ///
    /// # Examples
    ///
    ///   tend extract "Buy groceries tomorrow"
    ///   tend extract "Team sync every monday" -o json
    Extract {
        /// The task text
        text: String,
    },

    /// Add a task
    ///
    /// A date phrase inside the text becomes the due date and is removed
    /// from the title. Recurring phrases ("every monday", "monthly") also
    /// set the recurrence unless --every is given.
    ///
    /// # Examples
    ///
    ///   tend add "Buy groceries tomorrow"
    ///   tend add "Pay rent" --every monthly --due "end of month" --tag bills
    ///   tend add "Mum's birthday" --every yearly --due "in 3 weeks"
    #[command(alias = "a")]
    Add(AddArgs),

    /// List tasks
    ///
    /// Open tasks ordered by due date; undated tasks come last.
    #[command(alias = "ls")]
    List {
        /// Include completed tasks
        #[arg(short, long)]
        all: bool,
    },

    /// Show one task
    Show {
        /// Task ID
        id: String,
    },

    /// Complete a task
    ///
    /// Completing a recurring task adds its next occurrence.
    #[command(alias = "complete")]
    Done {
        /// Task ID
        id: String,
    },

    /// Mark a completed task as open again
    Reopen {
        /// Task ID
        id: String,
    },

    /// Delete a task
    #[command(alias = "rm")]
    Delete {
        /// Task ID
        id: String,
    },

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   tend completions bash > ~/.local/share/bash-completion/completions/tend
    ///   tend completions zsh > ~/.zsh/completions/_tend
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for adding a task.
#[derive(Args)]
pub struct AddArgs {
    /// Task text, optionally containing a date phrase
    pub text: String,

    /// Repeat the task: daily, weekly, biweekly, monthly, quarterly, yearly
    #[arg(short, long, value_name = "RECURRENCE")]
    pub every: Option<String>,

    /// Tag to attach (repeatable)
    #[arg(short, long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Longer description
    #[arg(short, long)]
    pub notes: Option<String>,

    /// Due date phrase, overriding any phrase in the text
    #[arg(short, long, value_name = "PHRASE")]
    pub due: Option<String>,
}
